use super::encoder::ecc;

// One Reed-Solomon block: data codewords followed by their error correction
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    codewords: Vec<u8>,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn new(data: &[u8], len: usize) -> Self {
        let dlen = data.len();
        debug_assert!(dlen < len, "Block of {len} codewords has no room for ecc: data {dlen}");

        let mut codewords = Vec::with_capacity(len);
        codewords.extend_from_slice(data);
        codewords.extend(ecc(data, len - dlen));
        Self { codewords, dlen }
    }

    pub fn len(&self) -> usize {
        self.codewords.len()
    }

    pub fn ec_len(&self) -> usize {
        self.len() - self.dlen
    }

    pub fn data(&self) -> &[u8] {
        &self.codewords[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.codewords[self.dlen..]
    }
}
