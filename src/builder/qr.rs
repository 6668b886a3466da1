use std::ops::Deref;

use crate::common::{
    bch::{FORMAT_INFO_BIT_LEN, VERSION_INFO_BIT_LEN},
    metadata::{format_info, Color, ECLevel, Version},
    BitStream, EncRegionIter, MaskPattern,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

/// Module matrix of one symbol. Built up pattern by pattern; a finished
/// symbol carries its mask and has no [`Module::Empty`] left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Empty; w * w], w, ver, ecl, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => format!(
                "{{ Version: {}, Ec level: {:?}, Mask: {} }}",
                *self.ver, self.ecl, *m
            ),
            None => format!("{{ Version: {}, Ec level: {:?}, Mask: None }}", *self.ver, self.ecl),
        }
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// Rows of the finished symbol, 1 for dark and 0 for light.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.grid.chunks(self.w).map(|row| row.iter().map(|m| **m as u8).collect()).collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity((w * (w + 1)) as usize);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let c = match self.get(i, j) {
                    Module::Empty => '.',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Negative coordinates count back from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row {r} out of bounds for width {w}");
        debug_assert!(-w <= c && c < w, "Column {c} out of bounds for width {w}");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r * w + c) as _
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, -4);
        self.draw_finder_pattern_at(-4, 3);
    }

    // 7x7 rings around (r, c) plus the light separator on the inner sides
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let (dr_top, dr_bottom) = if r > 0 { (-3, 4) } else { (-4, 3) };
        let (dc_left, dc_right) = if c > 0 { (-3, 4) } else { (-4, 3) };
        for i in dr_top..=dr_bottom {
            for j in dc_left..=dc_right {
                let clr = match (i, j) {
                    (4 | -4, _) | (_, 4 | -4) => Color::Light,
                    (3 | -3, _) | (_, 3 | -3) => Color::Dark,
                    (2 | -2, _) | (_, 2 | -2) => Color::Light,
                    _ => Color::Dark,
                };
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self, poses: &[usize]) {
        for &r in poses {
            for &c in poses {
                self.draw_alignment_pattern_at(r as i16, c as i16)
            }
        }
    }

    // Centres already claimed by a finder pattern are skipped
    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        if self.get(r, c) != Module::Empty {
            return;
        }
        for i in -2..=2 {
            for j in -2..=2 {
                let clr = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Color::Dark,
                    _ => Color::Light,
                };
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let last = self.w as i16 - 9;
        self.draw_line(6, 8, 6, last);
        self.draw_line(8, 6, last, 6);
    }

    // Dark on even indexes; modules set by earlier patterns are kept
    fn draw_line(&mut self, r1: i16, c1: i16, r2: i16, c2: i16) {
        debug_assert!(r1 == r2 || c1 == c2, "Line is neither vertical nor horizontal");

        let coords: Vec<(i16, i16)> = if r1 == r2 {
            (c1..=c2).map(|j| (r1, j)).collect()
        } else {
            (r1..=r2).map(|i| (i, c1)).collect()
        };
        for (r, c) in coords {
            if self.get(r, c) == Module::Empty {
                let clr = Color::from((r + c - 6) & 1 == 0);
                self.set(r, c, Module::Func(clr));
            }
        }
    }
}

#[cfg(test)]
mod timing_pattern_tests {
    use crate::builder::{Module, QR};
    use crate::common::metadata::{Color, ECLevel, Version};

    #[test]
    fn test_timing_pattern() {
        let mut qr = QR::new(Version::new(2).unwrap(), ECLevel::L);
        qr.draw_timing_pattern();
        let s = qr.to_debug_str();
        let rows = s.lines().skip(1).collect::<Vec<_>>();
        assert_eq!(&rows[6][8..17], "fFfFfFfFf");
        let col = rows[8..17].iter().map(|r| &r[6..7]).collect::<String>();
        assert_eq!(col, "fFfFfFfFf");
        assert_eq!(qr.grid().iter().filter(|m| **m != Module::Empty).count(), 18);
    }

    #[test]
    fn test_timing_keeps_existing_modules() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.set(6, 10, Module::Func(Color::Light));
        qr.draw_timing_pattern();
        assert_eq!(qr.get(6, 10), Module::Func(Color::Light));
        assert_eq!(qr.get(6, 12), Module::Func(Color::Dark));
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl QR {
    pub fn draw_all_function_patterns(&mut self, alignment_poses: &[usize]) {
        self.draw_finder_patterns();
        self.draw_alignment_patterns(alignment_poses);
        self.draw_timing_pattern();
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    // Format area is drawn all dark until a mask is placed
    pub fn reserve_format_area(&mut self) {
        self.draw_format_info((1 << FORMAT_INFO_BIT_LEN) - 1);
    }

    fn draw_format_info(&mut self, format_info: u32) {
        let (off, on) = (Module::Format(Color::Light), Module::Format(Color::Dark));
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(format_info, FORMAT_INFO_BIT_LEN, off, on, &FORMAT_INFO_COORDS_SIDE);
        // Dark module
        self.set(-8, 8, on);
    }

    pub fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }
        let ver_info = self.ver.info();
        let (off, on) = (Module::Version(Color::Light), Module::Version(Color::Dark));
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_TR);
        self.draw_number(ver_info, VERSION_INFO_BIT_LEN, off, on, &VERSION_INFO_COORDS_BL);
    }

    // Most significant bit goes to the first coordinate
    fn draw_number(
        &mut self,
        number: u32,
        bit_len: usize,
        off_clr: Module,
        on_clr: Module,
        coords: &[(i16, i16)],
    ) {
        debug_assert!(coords.len() == bit_len, "Expected {bit_len} coords, got {}", coords.len());

        let mut mask = 1 << (bit_len - 1);
        for &(r, c) in coords {
            let module = if number & mask == 0 { off_clr } else { on_clr };
            self.set(r, c, module);
            mask >>= 1;
        }
    }
}

#[cfg(test)]
mod qr_information_tests {
    use crate::builder::{Module, QR};
    use crate::common::{
        mask::MaskPattern,
        metadata::{format_info, Color, ECLevel, Version},
    };

    #[test]
    fn test_version_info_1() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.draw_version_info();
        assert!(qr.grid().iter().all(|m| *m == Module::Empty));
    }

    #[test]
    fn test_version_info_7() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_version_info();
        let s = qr.to_debug_str();
        let rows = s.lines().skip(1).collect::<Vec<_>>();
        let tr = rows[..6].iter().map(|r| &r[34..37]).collect::<Vec<_>>();
        assert_eq!(tr, ["VVv", "VvV", "VvV", "Vvv", "vvv", "VVV"]);
        let bl = rows[34..37].iter().map(|r| &r[..6]).collect::<Vec<_>>();
        assert_eq!(bl, ["VVVVvV", "VvvvvV", "vVVvvV"]);
    }

    #[test]
    fn test_version_info_lsb_position() {
        // 0x15683: version 21 with its remainder, least significant bit set
        let mut qr = QR::new(Version::new(21).unwrap(), ECLevel::L);
        qr.draw_version_info();
        let w = qr.width() as i16;
        assert_eq!(qr.get(0, w - 11), Module::Version(Color::Dark));
        assert_eq!(qr.get(w - 11, 0), Module::Version(Color::Dark));
        // Bit 1 of 0x15683 is set, bit 2 is not
        assert_eq!(qr.get(0, w - 10), Module::Version(Color::Dark));
        assert_eq!(qr.get(0, w - 9), Module::Version(Color::Light));
        // Most significant bit: 0x15683 >> 17 == 0
        assert_eq!(qr.get(5, w - 9), Module::Version(Color::Light));
        assert_eq!(qr.get(w - 9, 5), Module::Version(Color::Light));
    }

    #[test]
    fn test_reserve_format_info_qr() {
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.reserve_format_area();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             .....................\n\
             ........m............\n\
             mmmmmm.mm....mmmmmmmm\n\
             .....................\n\
             .....................\n\
             .....................\n\
             .....................\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n\
             ........m............\n"
        );
    }

    #[test]
    fn test_format_info_bit_order() {
        // L with mask 0 is 111011111000100
        let mut qr = QR::new(Version::MIN, ECLevel::L);
        qr.draw_format_info(format_info(ECLevel::L, MaskPattern::new(0).unwrap()));
        let s = qr.to_debug_str();
        let rows = s.lines().skip(1).collect::<Vec<_>>();
        assert_eq!(&rows[8][..9], "mmmMmm.mm");
        assert_eq!(&rows[8][13..], "mmMMMmMM");
        let col = rows.iter().map(|r| r.as_bytes()[8] as char).collect::<String>();
        assert_eq!(&col[..9], "MMmMMM.mm");
        assert_eq!(&col[13..], "mmmmMmmm");
    }

    #[test]
    fn test_all_function_patterns_and_qr_info() {
        let mut qr = QR::new(Version::new(7).unwrap(), ECLevel::L);
        qr.draw_all_function_patterns(&[6, 22, 38]);
        qr.draw_version_info();
        qr.reserve_format_area();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             fffffffFm.........................VVvFfffffff\n\
             fFFFFFfFm.........................VvVFfFFFFFf\n\
             fFfffFfFm.........................VvVFfFfffFf\n\
             fFfffFfFm.........................VvvFfFfffFf\n\
             fFfffFfFm...........fffff.........vvvFfFfffFf\n\
             fFFFFFfFm...........fFFFf.........VVVFfFFFFFf\n\
             fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff\n\
             FFFFFFFFm...........fFFFf............FFFFFFFF\n\
             mmmmmmfmm...........fffff............mmmmmmmm\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             ......f......................................\n\
             ......F......................................\n\
             VVVVvVf......................................\n\
             VvvvvVF......................................\n\
             vVVvvVf.............fffff...........fffff....\n\
             FFFFFFFFm...........fFFFf...........fFFFf....\n\
             fffffffFm...........fFfFf...........fFfFf....\n\
             fFFFFFfFm...........fFFFf...........fFFFf....\n\
             fFfffFfFm...........fffff...........fffff....\n\
             fFfffFfFm....................................\n\
             fFfffFfFm....................................\n\
             fFFFFFfFm....................................\n\
             fffffffFm....................................\n"
        );
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Writes the format info for `mask` and places `payload` over every
    /// module left empty, each bit XORed with the mask. Bits past the end of
    /// the payload are placed as 0.
    pub fn draw_encoding_region(&mut self, payload: &BitStream, mask: MaskPattern) {
        self.mask = Some(mask);
        self.draw_format_info(format_info(self.ecl, mask));

        let mask_fn = mask.mask_functions();
        let mut bits = payload.iter();
        let mut placed = 0;
        for (r, c) in EncRegionIter::new(self.ver) {
            if self.get(r, c) != Module::Empty {
                continue;
            }
            let bit = bits.next().unwrap_or(false);
            self.set(r, c, Module::Data(Color::from(bit ^ mask_fn(r, c))));
            placed += 1;
        }

        debug_assert!(bits.next().is_none(), "Payload overflows the encoding region");
        debug_assert!(
            placed - payload.len() == self.ver.remainder_bits(),
            "Unexpected remainder: Placed {placed}, Payload {}",
            payload.len()
        );
        debug_assert!(!self.grid.contains(&Module::Empty), "Empty module found after placement");
    }
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];
