use log::debug;

use super::{
    bitstream::BitStream,
    error::{QRError, QRResult},
    metadata::{ECLevel, Version},
    tables::SymbolTables,
};

pub const PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    pub const ALL: [Self; 3] = [Self::Numeric, Self::Alphanumeric, Self::Byte];

    pub const INDICATOR_BITS: usize = 4;

    /// Narrowest mode able to represent every byte of `data`.
    pub fn of(data: &[u8]) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| data.iter().all(|&b| m.contains(b)))
            .unwrap_or(Self::Byte)
    }

    pub fn contains(self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => Self::alphanumeric_value(byte).is_some(),
            Self::Byte => true,
        }
    }

    pub fn indicator(self) -> u8 {
        self as u8
    }

    fn alphanumeric_value(byte: u8) -> Option<u16> {
        let val = match byte {
            b'0'..=b'9' => byte - b'0',
            b'A'..=b'Z' => byte - b'A' + 10,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => return None,
        };
        Some(val as u16)
    }

    // Encoded size of `len` characters, headers excluded
    pub fn payload_bits(self, len: usize) -> usize {
        match self {
            Self::Numeric => 10 * (len / 3) + [0, 4, 7][len % 3],
            Self::Alphanumeric => 11 * (len / 2) + 6 * (len % 2),
            Self::Byte => 8 * len,
        }
    }

    // Bit width of a chunk of 1..=3 digits, 1..=2 alphanumerics or 1 byte
    fn chunk_bits(self, len: usize) -> usize {
        match self {
            Self::Numeric => (len * 10 + 2) / 3,
            Self::Alphanumeric => (len * 11 + 1) / 2,
            Self::Byte => 8,
        }
    }

    fn chunk_size(self) -> usize {
        match self {
            Self::Numeric => 3,
            Self::Alphanumeric => 2,
            Self::Byte => 1,
        }
    }

    pub fn encode_chunk(self, data: &[u8]) -> u16 {
        let len = data.len();
        debug_assert!(
            (1..=self.chunk_size()).contains(&len),
            "Invalid chunk length for {self:?}: {len}"
        );
        debug_assert!(data.iter().all(|&b| self.contains(b)), "Invalid character for {self:?}");

        match self {
            Self::Numeric => data.iter().fold(0, |n, &b| n * 10 + (b - b'0') as u16),
            Self::Alphanumeric => data
                .iter()
                .fold(0, |n, &b| n * 45 + Self::alphanumeric_value(b).unwrap_or_default()),
            Self::Byte => data[0] as u16,
        }
    }
}

pub fn determine_mode(data: &str) -> Mode {
    Mode::of(data.as_bytes())
}


// Version selection
//------------------------------------------------------------------------------

/// Total bits taken by `len` characters in `mode` at `ver`, before the
/// terminator and padding.
pub fn encoded_bit_len(len: usize, mode: Mode, ver: Version) -> usize {
    Mode::INDICATOR_BITS + ver.char_cnt_bits(mode) + mode.payload_bits(len)
}

pub fn select_version(
    len: usize,
    mode: Mode,
    ecl: ECLevel,
    tables: &SymbolTables,
) -> QRResult<Version> {
    for ver in Version::all() {
        if encoded_bit_len(len, mode, ver) <= tables.capacity(ecl, ver)? {
            return Ok(ver);
        }
    }
    Err(QRError::CapacityExceeded)
}

// Encoder
//------------------------------------------------------------------------------

pub fn encode(
    data: &[u8],
    ecl: ECLevel,
    tables: &SymbolTables,
) -> QRResult<(BitStream, Version, Mode)> {
    if data.is_empty() {
        return Err(QRError::EmptyData);
    }
    let mode = Mode::of(data);
    let ver = select_version(data.len(), mode, ecl, tables)?;
    debug!("Selected {mode:?} mode and version {} for {} bytes", *ver, data.len());

    let bs = write(data, mode, ver, tables.capacity(ecl, ver)?);
    Ok((bs, ver, mode))
}

pub fn encode_with_version(
    data: &[u8],
    ver: Version,
    ecl: ECLevel,
    tables: &SymbolTables,
) -> QRResult<(BitStream, Mode)> {
    if data.is_empty() {
        return Err(QRError::EmptyData);
    }
    let mode = Mode::of(data);
    let bcap = tables.capacity(ecl, ver)?;
    let len = data.len();
    if len >= 1 << ver.char_cnt_bits(mode) || encoded_bit_len(len, mode, ver) > bcap {
        return Err(QRError::CapacityExceeded);
    }
    Ok((write(data, mode, ver, bcap), mode))
}

fn write(data: &[u8], mode: Mode, ver: Version, bcap: usize) -> BitStream {
    let mut bs = BitStream::new(bcap);
    push_header(mode, ver, data.len(), &mut bs);
    push_payload(mode, data, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);
    debug_assert!(bs.len() == bcap, "Stream length {} differs from capacity {bcap}", bs.len());
    bs
}

// Writer for encoded data
//------------------------------------------------------------------------------

fn push_header(mode: Mode, ver: Version, char_cnt: usize, out: &mut BitStream) {
    let len_bits = ver.char_cnt_bits(mode);
    debug_assert!(
        char_cnt < (1 << len_bits),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
    );
    out.push_bits(mode.indicator(), Mode::INDICATOR_BITS);
    out.push_bits(char_cnt as u16, len_bits);
}

fn push_payload(mode: Mode, data: &[u8], out: &mut BitStream) {
    for chunk in data.chunks(mode.chunk_size()) {
        out.push_bits(mode.encode_chunk(chunk), mode.chunk_bits(chunk.len()));
    }
}

fn push_terminator(out: &mut BitStream) {
    let term_len = std::cmp::min(4, out.remaining());
    out.push_bits(0u8, term_len);
}

fn pad_remaining_capacity(out: &mut BitStream) {
    push_padding_bits(out);
    push_padding_codewords(out);
}

fn push_padding_bits(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0u8, 8 - offset);
    }
}

fn push_padding_codewords(out: &mut BitStream) {
    debug_assert!(
        out.len() & 7 == 0,
        "Bit offset should be zero before padding codewords: {}",
        out.len() & 7
    );

    let remain_byte_capacity = out.remaining() >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}
