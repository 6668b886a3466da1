use super::galois::{poly_mul, poly_rem, G};

// Generator polynomial
//------------------------------------------------------------------------------

// (x - a^0)(x - a^1)...(x - a^(nsym - 1)), highest degree first
pub fn generator_polynomial(nsym: usize) -> Vec<G> {
    (0..nsym).fold(vec![G::ONE], |gen, i| poly_mul(&gen, &[G::ONE, G::gen_pow(i)]))
}

// Encoder
//------------------------------------------------------------------------------

/// Error correction codewords of `data`: the remainder of `data * x^nsym`
/// divided by the generator polynomial.
pub fn ecc(data: &[u8], nsym: usize) -> Vec<u8> {
    debug_assert!(!data.is_empty(), "Empty data block");
    debug_assert!(nsym >= 1, "At least one error correction codeword is required");

    let gen = generator_polynomial(nsym);
    let mut msg = Vec::with_capacity(data.len() + nsym);
    msg.extend(data.iter().map(|&b| G(b)));
    msg.resize(data.len() + nsym, G::ZERO);
    poly_rem(&msg, &gen).into_iter().map(u8::from).collect()
}

/// Systematic encoding: `data` followed by its `nsym` error correction
/// codewords.
pub fn rs_encode(data: &[u8], nsym: usize) -> Vec<u8> {
    let mut res = data.to_vec();
    res.extend(ecc(data, nsym));
    res
}
