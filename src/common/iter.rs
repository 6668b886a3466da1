use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

const VERT_TIMING_COL: i16 = 6;

/// Walks every coordinate outside the vertical timing column in placement
/// order: two-column strips from the right edge leftwards, sweeping up and down
/// alternately, right column before left within a row.
pub struct EncRegionIter {
    r: i16,
    // Right column of the current strip
    c: i16,
    width: i16,
    upward: bool,
    left: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w, upward: true, left: false }
    }

    fn next_strip(&mut self) {
        self.c -= 2;
        if self.c == VERT_TIMING_COL {
            self.c -= 1;
        }
        self.upward = !self.upward;
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 1 {
            return None;
        }

        let res = (self.r, if self.left { self.c - 1 } else { self.c });
        if !self.left {
            self.left = true;
            return Some(res);
        }

        self.left = false;
        match self.upward {
            true if self.r > 0 => self.r -= 1,
            false if self.r < self.width - 1 => self.r += 1,
            _ => self.next_strip(),
        }
        Some(res)
    }
}
