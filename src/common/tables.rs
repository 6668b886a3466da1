use super::{
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
};

// Block structure
//------------------------------------------------------------------------------

// `count` blocks of `total` codewords, `data` of which carry data
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockGroup {
    pub count: usize,
    pub total: usize,
    pub data: usize,
}

impl BlockGroup {
    pub const fn new(count: usize, total: usize, data: usize) -> Self {
        Self { count, total, data }
    }

    pub fn ec_len(&self) -> usize {
        self.total - self.data
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockDescriptor {
    pub total: usize,
    pub data: usize,
}

// Symbol tables
//------------------------------------------------------------------------------

/// Immutable lookup data consumed by the encoder: data bit capacity and
/// Reed-Solomon block structure per (level, version), plus alignment pattern
/// centres per version. Rows are indexed by `version - 1`.
#[derive(Debug, Clone, Copy)]
pub struct SymbolTables<'t> {
    capacity: [&'t [usize]; 4],
    blocks: [&'t [&'t [BlockGroup]]; 4],
    alignment: &'t [&'t [usize]],
}

impl<'t> SymbolTables<'t> {
    /// Tables are indexed by [`ECLevel`] in L, M, Q, H order.
    pub fn new(
        capacity: [&'t [usize]; 4],
        blocks: [&'t [&'t [BlockGroup]]; 4],
        alignment: &'t [&'t [usize]],
    ) -> Self {
        Self { capacity, blocks, alignment }
    }

    pub fn capacity(&self, ecl: ECLevel, ver: Version) -> QRResult<usize> {
        let malformed = QRError::MalformedTable { table: "capacity", ecl, version: *ver };
        let &bits = self.capacity[ecl as usize].get(*ver as usize - 1).ok_or(malformed)?;
        if bits == 0 || bits & 7 != 0 || bits > ver.total_codewords() << 3 {
            return Err(malformed);
        }
        Ok(bits)
    }

    pub fn block_groups(&self, ecl: ECLevel, ver: Version) -> QRResult<&'t [BlockGroup]> {
        let malformed = QRError::MalformedTable { table: "block structure", ecl, version: *ver };
        let &groups = self.blocks[ecl as usize].get(*ver as usize - 1).ok_or(malformed)?;

        let ec_len = groups.first().ok_or(malformed)?.ec_len();
        let well_formed = groups.iter().all(|g| g.count > 0 && g.data > 0 && g.total > g.data)
            && groups.iter().all(|g| g.ec_len() == ec_len);
        if !well_formed {
            return Err(malformed);
        }

        let total: usize = groups.iter().map(|g| g.count * g.total).sum();
        let data: usize = groups.iter().map(|g| g.count * g.data).sum();
        if total != ver.total_codewords() || data << 3 != self.capacity(ecl, ver)? {
            return Err(malformed);
        }
        Ok(groups)
    }

    /// One descriptor per block, short blocks first, in table order.
    pub fn block_descriptors(&self, ecl: ECLevel, ver: Version) -> QRResult<Vec<BlockDescriptor>> {
        let groups = self.block_groups(ecl, ver)?;
        Ok(groups
            .iter()
            .flat_map(|g| (0..g.count).map(|_| BlockDescriptor { total: g.total, data: g.data }))
            .collect())
    }

    pub fn alignment_positions(&self, ecl: ECLevel, ver: Version) -> QRResult<&'t [usize]> {
        let malformed = QRError::MalformedTable { table: "alignment", ecl, version: *ver };
        let &poses = self.alignment.get(*ver as usize - 1).ok_or(malformed)?;
        if poses.iter().any(|&p| p < 2 || p + 2 >= ver.width()) {
            return Err(malformed);
        }
        Ok(poses)
    }
}

impl SymbolTables<'static> {
    /// ISO/IEC 18004 tables.
    pub fn standard() -> Self {
        Self {
            capacity: [
                &DATA_BIT_CAPACITY[0],
                &DATA_BIT_CAPACITY[1],
                &DATA_BIT_CAPACITY[2],
                &DATA_BIT_CAPACITY[3],
            ],
            blocks: [
                &BLOCK_STRUCTURE[0],
                &BLOCK_STRUCTURE[1],
                &BLOCK_STRUCTURE[2],
                &BLOCK_STRUCTURE[3],
            ],
            alignment: &ALIGNMENT_PATTERN_POSITIONS,
        }
    }
}

impl Default for SymbolTables<'static> {
    fn default() -> Self {
        Self::standard()
    }
}


// Global constants
//------------------------------------------------------------------------------

static DATA_BIT_CAPACITY: [[usize; 40]; 4] = [
    // L
    [
        152, 272, 440, 640, 864, 1088, 1248, 1552,
        1856, 2192, 2592, 2960, 3424, 3688, 4184, 4712,
        5176, 5768, 6360, 6888, 7456, 8048, 8752, 9392,
        10208, 10960, 11744, 12248, 13048, 13880, 14744, 15640,
        16568, 17528, 18448, 19472, 20528, 21616, 22496, 23648,
    ],
    // M
    [
        128, 224, 352, 512, 688, 864, 992, 1232,
        1456, 1728, 2032, 2320, 2672, 2920, 3320, 3624,
        4056, 4504, 5016, 5352, 5712, 6256, 6880, 7312,
        8000, 8496, 9024, 9544, 10136, 10984, 11640, 12328,
        13048, 13800, 14496, 15312, 15936, 16816, 17728, 18672,
    ],
    // Q
    [
        104, 176, 272, 384, 496, 608, 704, 880,
        1056, 1232, 1440, 1648, 1952, 2088, 2360, 2600,
        2936, 3176, 3560, 3880, 4096, 4544, 4912, 5312,
        5744, 6032, 6464, 6968, 7288, 7880, 8264, 8920,
        9368, 9848, 10288, 10832, 11408, 12016, 12656, 13328,
    ],
    // H
    [
        72, 128, 208, 288, 368, 480, 528, 688,
        800, 976, 1120, 1264, 1440, 1576, 1784, 2024,
        2264, 2504, 2728, 3080, 3248, 3536, 3712, 4112,
        4304, 4768, 5024, 5288, 5608, 5960, 6344, 6760,
        7208, 7688, 7888, 8432, 8768, 9136, 9776, 10208,
    ],
];

static BLOCK_STRUCTURE: [[&[BlockGroup]; 40]; 4] = [
    // L
    [
        &[BlockGroup::new(1, 26, 19)],
        &[BlockGroup::new(1, 44, 34)],
        &[BlockGroup::new(1, 70, 55)],
        &[BlockGroup::new(1, 100, 80)],
        &[BlockGroup::new(1, 134, 108)],
        &[BlockGroup::new(2, 86, 68)],
        &[BlockGroup::new(2, 98, 78)],
        &[BlockGroup::new(2, 121, 97)],
        &[BlockGroup::new(2, 146, 116)],
        &[BlockGroup::new(2, 86, 68), BlockGroup::new(2, 87, 69)],
        &[BlockGroup::new(4, 101, 81)],
        &[BlockGroup::new(2, 116, 92), BlockGroup::new(2, 117, 93)],
        &[BlockGroup::new(4, 133, 107)],
        &[BlockGroup::new(3, 145, 115), BlockGroup::new(1, 146, 116)],
        &[BlockGroup::new(5, 109, 87), BlockGroup::new(1, 110, 88)],
        &[BlockGroup::new(5, 122, 98), BlockGroup::new(1, 123, 99)],
        &[BlockGroup::new(1, 135, 107), BlockGroup::new(5, 136, 108)],
        &[BlockGroup::new(5, 150, 120), BlockGroup::new(1, 151, 121)],
        &[BlockGroup::new(3, 141, 113), BlockGroup::new(4, 142, 114)],
        &[BlockGroup::new(3, 135, 107), BlockGroup::new(5, 136, 108)],
        &[BlockGroup::new(4, 144, 116), BlockGroup::new(4, 145, 117)],
        &[BlockGroup::new(2, 139, 111), BlockGroup::new(7, 140, 112)],
        &[BlockGroup::new(4, 151, 121), BlockGroup::new(5, 152, 122)],
        &[BlockGroup::new(6, 147, 117), BlockGroup::new(4, 148, 118)],
        &[BlockGroup::new(8, 132, 106), BlockGroup::new(4, 133, 107)],
        &[BlockGroup::new(10, 142, 114), BlockGroup::new(2, 143, 115)],
        &[BlockGroup::new(8, 152, 122), BlockGroup::new(4, 153, 123)],
        &[BlockGroup::new(3, 147, 117), BlockGroup::new(10, 148, 118)],
        &[BlockGroup::new(7, 146, 116), BlockGroup::new(7, 147, 117)],
        &[BlockGroup::new(5, 145, 115), BlockGroup::new(10, 146, 116)],
        &[BlockGroup::new(13, 145, 115), BlockGroup::new(3, 146, 116)],
        &[BlockGroup::new(17, 145, 115)],
        &[BlockGroup::new(17, 145, 115), BlockGroup::new(1, 146, 116)],
        &[BlockGroup::new(13, 145, 115), BlockGroup::new(6, 146, 116)],
        &[BlockGroup::new(12, 151, 121), BlockGroup::new(7, 152, 122)],
        &[BlockGroup::new(6, 151, 121), BlockGroup::new(14, 152, 122)],
        &[BlockGroup::new(17, 152, 122), BlockGroup::new(4, 153, 123)],
        &[BlockGroup::new(4, 152, 122), BlockGroup::new(18, 153, 123)],
        &[BlockGroup::new(20, 147, 117), BlockGroup::new(4, 148, 118)],
        &[BlockGroup::new(19, 148, 118), BlockGroup::new(6, 149, 119)],
    ],
    // M
    [
        &[BlockGroup::new(1, 26, 16)],
        &[BlockGroup::new(1, 44, 28)],
        &[BlockGroup::new(1, 70, 44)],
        &[BlockGroup::new(2, 50, 32)],
        &[BlockGroup::new(2, 67, 43)],
        &[BlockGroup::new(4, 43, 27)],
        &[BlockGroup::new(4, 49, 31)],
        &[BlockGroup::new(2, 60, 38), BlockGroup::new(2, 61, 39)],
        &[BlockGroup::new(3, 58, 36), BlockGroup::new(2, 59, 37)],
        &[BlockGroup::new(4, 69, 43), BlockGroup::new(1, 70, 44)],
        &[BlockGroup::new(1, 80, 50), BlockGroup::new(4, 81, 51)],
        &[BlockGroup::new(6, 58, 36), BlockGroup::new(2, 59, 37)],
        &[BlockGroup::new(8, 59, 37), BlockGroup::new(1, 60, 38)],
        &[BlockGroup::new(4, 64, 40), BlockGroup::new(5, 65, 41)],
        &[BlockGroup::new(5, 65, 41), BlockGroup::new(5, 66, 42)],
        &[BlockGroup::new(7, 73, 45), BlockGroup::new(3, 74, 46)],
        &[BlockGroup::new(10, 74, 46), BlockGroup::new(1, 75, 47)],
        &[BlockGroup::new(9, 69, 43), BlockGroup::new(4, 70, 44)],
        &[BlockGroup::new(3, 70, 44), BlockGroup::new(11, 71, 45)],
        &[BlockGroup::new(3, 67, 41), BlockGroup::new(13, 68, 42)],
        &[BlockGroup::new(17, 68, 42)],
        &[BlockGroup::new(17, 74, 46)],
        &[BlockGroup::new(4, 75, 47), BlockGroup::new(14, 76, 48)],
        &[BlockGroup::new(6, 73, 45), BlockGroup::new(14, 74, 46)],
        &[BlockGroup::new(8, 75, 47), BlockGroup::new(13, 76, 48)],
        &[BlockGroup::new(19, 74, 46), BlockGroup::new(4, 75, 47)],
        &[BlockGroup::new(22, 73, 45), BlockGroup::new(3, 74, 46)],
        &[BlockGroup::new(3, 73, 45), BlockGroup::new(23, 74, 46)],
        &[BlockGroup::new(21, 73, 45), BlockGroup::new(7, 74, 46)],
        &[BlockGroup::new(19, 75, 47), BlockGroup::new(10, 76, 48)],
        &[BlockGroup::new(2, 74, 46), BlockGroup::new(29, 75, 47)],
        &[BlockGroup::new(10, 74, 46), BlockGroup::new(23, 75, 47)],
        &[BlockGroup::new(14, 74, 46), BlockGroup::new(21, 75, 47)],
        &[BlockGroup::new(14, 74, 46), BlockGroup::new(23, 75, 47)],
        &[BlockGroup::new(12, 75, 47), BlockGroup::new(26, 76, 48)],
        &[BlockGroup::new(6, 75, 47), BlockGroup::new(34, 76, 48)],
        &[BlockGroup::new(29, 74, 46), BlockGroup::new(14, 75, 47)],
        &[BlockGroup::new(13, 74, 46), BlockGroup::new(32, 75, 47)],
        &[BlockGroup::new(40, 75, 47), BlockGroup::new(7, 76, 48)],
        &[BlockGroup::new(18, 75, 47), BlockGroup::new(31, 76, 48)],
    ],
    // Q
    [
        &[BlockGroup::new(1, 26, 13)],
        &[BlockGroup::new(1, 44, 22)],
        &[BlockGroup::new(2, 35, 17)],
        &[BlockGroup::new(2, 50, 24)],
        &[BlockGroup::new(2, 33, 15), BlockGroup::new(2, 34, 16)],
        &[BlockGroup::new(4, 43, 19)],
        &[BlockGroup::new(2, 32, 14), BlockGroup::new(4, 33, 15)],
        &[BlockGroup::new(4, 40, 18), BlockGroup::new(2, 41, 19)],
        &[BlockGroup::new(4, 36, 16), BlockGroup::new(4, 37, 17)],
        &[BlockGroup::new(6, 43, 19), BlockGroup::new(2, 44, 20)],
        &[BlockGroup::new(4, 50, 22), BlockGroup::new(4, 51, 23)],
        &[BlockGroup::new(4, 46, 20), BlockGroup::new(6, 47, 21)],
        &[BlockGroup::new(8, 44, 20), BlockGroup::new(4, 45, 21)],
        &[BlockGroup::new(11, 36, 16), BlockGroup::new(5, 37, 17)],
        &[BlockGroup::new(5, 54, 24), BlockGroup::new(7, 55, 25)],
        &[BlockGroup::new(15, 43, 19), BlockGroup::new(2, 44, 20)],
        &[BlockGroup::new(1, 50, 22), BlockGroup::new(15, 51, 23)],
        &[BlockGroup::new(17, 50, 22), BlockGroup::new(1, 51, 23)],
        &[BlockGroup::new(17, 47, 21), BlockGroup::new(4, 48, 22)],
        &[BlockGroup::new(15, 54, 24), BlockGroup::new(5, 55, 25)],
        &[BlockGroup::new(17, 50, 22), BlockGroup::new(6, 51, 23)],
        &[BlockGroup::new(7, 54, 24), BlockGroup::new(16, 55, 25)],
        &[BlockGroup::new(11, 54, 24), BlockGroup::new(14, 55, 25)],
        &[BlockGroup::new(11, 54, 24), BlockGroup::new(16, 55, 25)],
        &[BlockGroup::new(7, 54, 24), BlockGroup::new(22, 55, 25)],
        &[BlockGroup::new(28, 50, 22), BlockGroup::new(6, 51, 23)],
        &[BlockGroup::new(8, 53, 23), BlockGroup::new(26, 54, 24)],
        &[BlockGroup::new(4, 54, 24), BlockGroup::new(31, 55, 25)],
        &[BlockGroup::new(1, 53, 23), BlockGroup::new(37, 54, 24)],
        &[BlockGroup::new(15, 54, 24), BlockGroup::new(25, 55, 25)],
        &[BlockGroup::new(42, 54, 24), BlockGroup::new(1, 55, 25)],
        &[BlockGroup::new(10, 54, 24), BlockGroup::new(35, 55, 25)],
        &[BlockGroup::new(29, 54, 24), BlockGroup::new(19, 55, 25)],
        &[BlockGroup::new(44, 54, 24), BlockGroup::new(7, 55, 25)],
        &[BlockGroup::new(39, 54, 24), BlockGroup::new(14, 55, 25)],
        &[BlockGroup::new(46, 54, 24), BlockGroup::new(10, 55, 25)],
        &[BlockGroup::new(49, 54, 24), BlockGroup::new(10, 55, 25)],
        &[BlockGroup::new(48, 54, 24), BlockGroup::new(14, 55, 25)],
        &[BlockGroup::new(43, 54, 24), BlockGroup::new(22, 55, 25)],
        &[BlockGroup::new(34, 54, 24), BlockGroup::new(34, 55, 25)],
    ],
    // H
    [
        &[BlockGroup::new(1, 26, 9)],
        &[BlockGroup::new(1, 44, 16)],
        &[BlockGroup::new(2, 35, 13)],
        &[BlockGroup::new(4, 25, 9)],
        &[BlockGroup::new(2, 33, 11), BlockGroup::new(2, 34, 12)],
        &[BlockGroup::new(4, 43, 15)],
        &[BlockGroup::new(4, 39, 13), BlockGroup::new(1, 40, 14)],
        &[BlockGroup::new(4, 40, 14), BlockGroup::new(2, 41, 15)],
        &[BlockGroup::new(4, 36, 12), BlockGroup::new(4, 37, 13)],
        &[BlockGroup::new(6, 43, 15), BlockGroup::new(2, 44, 16)],
        &[BlockGroup::new(3, 36, 12), BlockGroup::new(8, 37, 13)],
        &[BlockGroup::new(7, 42, 14), BlockGroup::new(4, 43, 15)],
        &[BlockGroup::new(12, 33, 11), BlockGroup::new(4, 34, 12)],
        &[BlockGroup::new(11, 36, 12), BlockGroup::new(5, 37, 13)],
        &[BlockGroup::new(11, 36, 12), BlockGroup::new(7, 37, 13)],
        &[BlockGroup::new(3, 45, 15), BlockGroup::new(13, 46, 16)],
        &[BlockGroup::new(2, 42, 14), BlockGroup::new(17, 43, 15)],
        &[BlockGroup::new(2, 42, 14), BlockGroup::new(19, 43, 15)],
        &[BlockGroup::new(9, 39, 13), BlockGroup::new(16, 40, 14)],
        &[BlockGroup::new(15, 43, 15), BlockGroup::new(10, 44, 16)],
        &[BlockGroup::new(19, 46, 16), BlockGroup::new(6, 47, 17)],
        &[BlockGroup::new(34, 37, 13)],
        &[BlockGroup::new(16, 45, 15), BlockGroup::new(14, 46, 16)],
        &[BlockGroup::new(30, 46, 16), BlockGroup::new(2, 47, 17)],
        &[BlockGroup::new(22, 45, 15), BlockGroup::new(13, 46, 16)],
        &[BlockGroup::new(33, 46, 16), BlockGroup::new(4, 47, 17)],
        &[BlockGroup::new(12, 45, 15), BlockGroup::new(28, 46, 16)],
        &[BlockGroup::new(11, 45, 15), BlockGroup::new(31, 46, 16)],
        &[BlockGroup::new(19, 45, 15), BlockGroup::new(26, 46, 16)],
        &[BlockGroup::new(23, 45, 15), BlockGroup::new(25, 46, 16)],
        &[BlockGroup::new(23, 45, 15), BlockGroup::new(28, 46, 16)],
        &[BlockGroup::new(19, 45, 15), BlockGroup::new(35, 46, 16)],
        &[BlockGroup::new(11, 45, 15), BlockGroup::new(46, 46, 16)],
        &[BlockGroup::new(59, 46, 16), BlockGroup::new(1, 47, 17)],
        &[BlockGroup::new(22, 45, 15), BlockGroup::new(41, 46, 16)],
        &[BlockGroup::new(2, 45, 15), BlockGroup::new(64, 46, 16)],
        &[BlockGroup::new(24, 45, 15), BlockGroup::new(46, 46, 16)],
        &[BlockGroup::new(42, 45, 15), BlockGroup::new(32, 46, 16)],
        &[BlockGroup::new(10, 45, 15), BlockGroup::new(67, 46, 16)],
        &[BlockGroup::new(20, 45, 15), BlockGroup::new(61, 46, 16)],
    ],
];

static ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];
