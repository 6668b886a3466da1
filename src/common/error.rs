use thiserror::Error;

use super::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("empty data")]
    EmptyData,

    #[error("data exceeds the capacity of every version at this error correction level")]
    CapacityExceeded,

    #[error("invalid version")]
    InvalidVersion,

    #[error("invalid masking pattern")]
    InvalidMaskingPattern,

    #[error("malformed {table} table entry for version {version} at level {ecl:?}")]
    MalformedTable { table: &'static str, ecl: ECLevel, version: u8 },
}

pub type QRResult<T> = Result<T, QRError>;
