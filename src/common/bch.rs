// BCH codes over GF(2) for the version and format info words. Polynomials are
// packed into integers, most significant coefficient in the highest bit.

// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;

// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0b101_0011_0111;

// XORed onto the format word
pub const FORMAT_MASK: u32 = 0b101_0100_0001_0010;

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

/// Remainder of `value * x^(n - k)` divided by `generator`, an `n - k` bit
/// check word for the `k` bit `value`.
pub fn bch_encode(value: u32, n: usize, k: usize, generator: u32) -> u32 {
    debug_assert!(n <= 32 && k < n, "Unsupported code length: n {n}, k {k}");
    debug_assert!(value >> k == 0, "Value {value:#b} is wider than {k} bits");
    debug_assert!(
        32 - generator.leading_zeros() as usize == n - k + 1,
        "Generator {generator:#b} is not of degree {}",
        n - k
    );

    poly_rem(value << (n - k), generator)
}

/// Remainder of the GF(2) polynomial division of `dividend` by `divisor`.
pub fn poly_rem(mut dividend: u32, divisor: u32) -> u32 {
    debug_assert!(divisor != 0, "Division by zero polynomial");

    let deg = 31 - divisor.leading_zeros();
    while dividend != 0 && 31 - dividend.leading_zeros() >= deg {
        let shift = 31 - dividend.leading_zeros() - deg;
        dividend ^= divisor << shift;
    }
    dividend
}
