use std::ops::{Add, AddAssign, Mul, MulAssign};

// Primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
const PRIMITIVE: u16 = 0x11D;

// Exp table runs twice through the field so exp[log a + log b] never wraps
pub static EXP_TABLE: [u8; 512] = build_tables().0;

// log[0] is undefined and never read
pub static LOG_TABLE: [u8; 256] = build_tables().1;

const fn build_tables() -> ([u8; 512], [u8; 256]) {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    while i < 512 {
        exp[i] = exp[i - 255];
        i += 1;
    }
    (exp, log)
}

// Galois field element
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct G(pub u8);

impl G {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    // alpha^i where alpha = 2 generates the field
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn log(self) -> usize {
        debug_assert!(self.0 != 0, "Log of zero is undefined");
        LOG_TABLE[self.0 as usize] as usize
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.0 == 0 || rhs.0 == 0 {
            return Self::ZERO;
        }
        Self(EXP_TABLE[self.log() + rhs.log()])
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Polynomials
//------------------------------------------------------------------------------

// Coefficients are ordered from the highest degree term down
pub fn poly_mul(lhs: &[G], rhs: &[G]) -> Vec<G> {
    debug_assert!(!lhs.is_empty() && !rhs.is_empty(), "Empty polynomial");

    let mut res = vec![G::ZERO; lhs.len() + rhs.len() - 1];
    for (i, &a) in lhs.iter().enumerate() {
        for (j, &b) in rhs.iter().enumerate() {
            res[i + j] += a * b;
        }
    }
    res
}

// Remainder of dividing `dividend` by a monic `divisor`
pub fn poly_rem(dividend: &[G], divisor: &[G]) -> Vec<G> {
    debug_assert!(divisor.first() == Some(&G::ONE), "Divisor must be monic");
    debug_assert!(dividend.len() >= divisor.len(), "Dividend is shorter than divisor");

    let quot_len = dividend.len() - divisor.len() + 1;
    let mut res = dividend.to_vec();
    for i in 0..quot_len {
        let lead = res[i];
        if lead == G::ZERO {
            continue;
        }
        for (r, &d) in res[i + 1..].iter_mut().zip(&divisor[1..]) {
            *r += d * lead;
        }
    }
    res.split_off(quot_len)
}
