pub mod bch;
pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod tables;

pub use bitstream::BitStream;
pub use iter::EncRegionIter;
pub use mask::MaskPattern;
