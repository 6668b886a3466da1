mod qr;
mod render;

pub use qr::{Module, QR};

use std::ops::Deref;

use log::debug;

use crate::common::{
    codec::{encode, encode_with_version},
    ec::Block,
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
    tables::{BlockDescriptor, SymbolTables},
    BitStream,
};

pub struct QRBuilder<'a> {
    data: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
    tables: SymbolTables<'a>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            version: None,
            ec_level: ECLevel::M,
            mask: None,
            tables: SymbolTables::standard(),
        }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    /// Capacity, block structure and alignment data to encode against.
    pub fn tables(&mut self, tables: SymbolTables<'a>) -> &mut Self {
        self.tables = tables;
        self
    }

    pub fn metadata(&self) -> String {
        let ver = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {ver}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        let data = self.data.as_bytes();
        let ecl = self.ec_level;
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(data, v, ecl, &self.tables)?.0, v),
            None => {
                let (bs, v, _) = encode(data, ecl, &self.tables)?;
                (bs, v)
            }
        };

        debug!("Constructing payload with ecc & interleaving");
        let descriptors = self.tables.block_descriptors(ecl, version)?;
        let blocks = Self::compute_ecc(encoded_data.data(), &descriptors);
        let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
        let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();

        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));

        debug!("Drawing function patterns for version {}", *version);
        let mut qr = QR::new(version, ecl);
        qr.draw_all_function_patterns(self.tables.alignment_positions(ecl, version)?);
        qr.draw_version_info();
        qr.reserve_format_area();

        let qr = match self.mask {
            Some(m) => {
                debug!("Applying mask {}", *m);
                qr.draw_encoding_region(&payload, m);
                qr
            }
            None => {
                debug!("Finding & applying best mask");
                apply_best_mask(&qr, &payload)
            }
        };

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        debug!("Generated QR {}", qr.metadata());
        debug!(
            "Data codewords: {}, Blocks: {}, Ecc per block: {}, Dark modules: {dark_modules}/{total_modules}",
            encoded_data.len() >> 3,
            blocks.len(),
            blocks.first().map_or(0, Block::ec_len)
        );

        Ok(qr)
    }

    // ECC: Error Correction Codeword generator
    fn compute_ecc(data: &[u8], descriptors: &[BlockDescriptor]) -> Vec<Block> {
        Self::blockify(data, descriptors)
            .into_iter()
            .zip(descriptors)
            .map(|(d, desc)| Block::new(d, desc.total))
            .collect()
    }

    // Slices data sequentially into each block's data codewords
    pub(crate) fn blockify<'d>(data: &'d [u8], descriptors: &[BlockDescriptor]) -> Vec<&'d [u8]> {
        let total_size = descriptors.iter().map(|d| d.data).sum::<usize>();
        debug_assert!(
            total_size == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            total_size
        );

        let mut rest = data;
        descriptors
            .iter()
            .map(|d| {
                let (block, tail) = rest.split_at(d.data);
                rest = tail;
                block
            })
            .collect()
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}

/// Encodes `data` at `ecl` against `tables`, choosing the smallest version
/// that fits and the mask with the lowest penalty.
pub fn encode_symbol(data: &str, ecl: ECLevel, tables: &SymbolTables) -> QRResult<QR> {
    QRBuilder::new(data).ec_level(ecl).tables(*tables).build()
}
