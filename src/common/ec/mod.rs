mod block;
mod encoder;
pub(crate) mod galois;

pub(crate) use block::*;
pub use encoder::{generator_polynomial, rs_encode};
