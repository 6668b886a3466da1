use std::ops::Deref;

use log::trace;
use rayon::prelude::*;

use super::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    metadata::Color,
};
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [Self; 8] =
        [Self(0), Self(1), Self(2), Self(3), Self(4), Self(5), Self(6), Self(7)];

    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern),
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r * c) % 3) + ((r + c) & 1)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match self.0 {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern {}", self.0),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use test_case::test_case;

    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
    }

    #[test_case(0, &[(0, 0), (1, 1), (2, 4)], &[(0, 1), (3, 4)])]
    #[test_case(1, &[(0, 5), (2, 1)], &[(1, 0), (5, 5)])]
    #[test_case(2, &[(1, 0), (4, 3)], &[(0, 1), (0, 5)])]
    #[test_case(3, &[(0, 0), (1, 2), (5, 4)], &[(1, 1), (2, 2)])]
    #[test_case(4, &[(0, 0), (1, 2), (2, 3)], &[(0, 3), (2, 0)])]
    #[test_case(5, &[(0, 4), (6, 1), (3, 2)], &[(1, 1), (5, 7)])]
    #[test_case(6, &[(0, 3), (1, 1), (2, 4)], &[(1, 3), (2, 2)])]
    #[test_case(7, &[(0, 0), (1, 3), (1, 5)], &[(0, 1), (1, 1), (2, 2)])]
    fn test_mask_functions(mask: u8, dark: &[(i16, i16)], light: &[(i16, i16)]) {
        let f = MaskPattern::new(mask).unwrap().mask_functions();
        assert!(dark.iter().all(|&(r, c)| f(r, c)));
        assert!(light.iter().all(|&(r, c)| !f(r, c)));
    }
}

// Mask selection
//------------------------------------------------------------------------------

// Places `payload` under every mask on its own copy of the pattern-only
// symbol; ties on penalty go to the lower mask id
pub fn apply_best_mask(qr: &QR, payload: &BitStream) -> QR {
    let (pen, best) = MaskPattern::ALL
        .par_iter()
        .map(|&m| {
            let mut candidate = qr.clone();
            candidate.draw_encoding_region(payload, m);
            let pen = compute_total_penalty(&candidate);
            trace!("Mask {}: penalty {pen}", *m);
            (pen, m)
        })
        .reduce(|| (u32::MAX, MaskPattern(7)), |a, b| a.min(b));
    trace!("Best mask {}: penalty {pen}", *best);

    let mut res = qr.clone();
    res.draw_encoding_region(payload, best);
    res
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Lines of the symbol, rows first then columns
fn lines(qr: &QR, is_hor: bool) -> impl Iterator<Item = Vec<Color>> + '_ {
    let w = qr.width() as i16;
    (0..w).map(move |i| {
        (0..w).map(|j| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) }).collect()
    })
}

fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let run_penalty = |run: u32| if run >= 5 { run - 2 } else { 0 };
    let mut pen = 0;
    for line in lines(qr, true).chain(lines(qr, false)) {
        let mut run = 1;
        for pair in line.windows(2) {
            if pair[0] == pair[1] {
                run += 1;
            } else {
                pen += run_penalty(run);
                run = 1;
            }
        }
        pen += run_penalty(run);
    }
    pen
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];
    lines(qr, is_hor)
        .map(|line| line.windows(7).filter(|w| *w == PATTERN).count() as u32 * 40)
        .sum()
}

fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let tot = w * w;
    (10 * ((2 * dark_cnt).abs_diff(tot) / tot)) as u32
}
