//! # qrforge
//!
//! A Rust library for generating QR codes from first principles. Every stage of the
//! pipeline is implemented in the crate: mode selection, bit stream construction,
//! Reed-Solomon error correction over GF(256), BCH-coded format and version info, and
//! penalty-driven mask selection.
//!
//! ## Features
//!
//! - **Mode & version selection**: Picks the narrowest of numeric, alphanumeric and byte
//!   modes, then the smallest version whose capacity fits the data
//! - **Reed-Solomon Error Correction**: Error correction levels L, M, Q and H, with data
//!   split into blocks and interleaved as prescribed for each version
//! - **Mask selection**: All 8 masks are scored in parallel against the 4 penalty rules
//!   and the lowest penalty wins, ties going to the lower mask id
//! - **Pluggable tables**: Capacity, block structure and alignment tables are plain data
//!   handed to the encoder, with the ISO/IEC 18004 tables built in
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrforge::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new("Hello, World!").build()?;
//!
//! let matrix = qr.to_matrix(); // 1 for dark, 0 for light
//! assert_eq!(matrix.len(), qr.width());
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrforge::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!")
//!     .version(Version::new(2)?)       // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)            // if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)      // if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! let img = qr.to_image(4); // 4 pixels per module
//! assert_eq!(img.width(), (25 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom tables
//!
//! ```rust
//! use qrforge::{encode_symbol, ECLevel, SymbolTables};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = SymbolTables::standard();
//! let qr = encode_symbol("AC-42", ECLevel::H, &tables)?;
//! assert_eq!(*qr.version(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages are reported through the [`log`] facade at `debug` level, per mask
//! penalties at `trace` level. No logger is installed by the library.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{encode_symbol, QRBuilder, QR};
pub use common::bch::bch_encode;
pub use common::bitstream::BitStream;
pub use common::codec::{determine_mode, select_version, Mode};
pub use common::ec::{galois::G, generator_polynomial, rs_encode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use common::tables::{BlockDescriptor, BlockGroup, SymbolTables};
