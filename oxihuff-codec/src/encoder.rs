//! Huffman encoder (raw bytes to bitstream).

use crate::code::CodeTable;
use crate::config::CodecConfig;
use log::debug;
use oxihuff_core::bitstream::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Sizes reported after encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeStats {
    /// Number of input bytes consumed.
    pub original_size: u64,
    /// Number of bytes written, including the padded final byte.
    pub encoded_size: u64,
    /// Number of code bits written, padding excluded.
    pub encoded_bits: u64,
}

impl EncodeStats {
    /// Encoded size as a percentage of the original size.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.encoded_size as f64 / self.original_size as f64 * 100.0
        }
    }
}

/// Huffman encoder driven by a [`CodeTable`].
#[derive(Debug)]
pub struct HuffmanEncoder<'a> {
    codes: &'a CodeTable,
    config: CodecConfig,
}

impl<'a> HuffmanEncoder<'a> {
    /// Create an encoder for the given codes.
    pub fn new(codes: &'a CodeTable, config: CodecConfig) -> Self {
        Self { codes, config }
    }

    /// Encode everything `reader` yields into `writer`.
    pub fn encode<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<EncodeStats> {
        self.encode_with_progress(reader, writer, |_| {})
    }

    /// Encode like [`HuffmanEncoder::encode`], calling `on_block` with the
    /// size of every input block once it has been consumed.
    ///
    /// # Algorithm
    ///
    /// 1. Read one block of input
    /// 2. For each byte, append its code to the bit writer MSB-first
    /// 3. The bit writer flushes every completed byte to its output block
    /// 4. After the last block, left-align and flush the partial byte
    pub fn encode_with_progress<R, W, F>(
        &self,
        mut reader: R,
        writer: W,
        mut on_block: F,
    ) -> Result<EncodeStats>
    where
        R: Read,
        W: Write,
        F: FnMut(usize),
    {
        let mut bits = BitWriter::with_block_size(writer, self.config.block_size());
        let mut block = vec![0u8; self.config.block_size()];
        let mut original_size = 0u64;

        loop {
            let n = match reader.read(&mut block) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            for &byte in &block[..n] {
                let code = self
                    .codes
                    .get(byte)
                    .ok_or_else(|| OxiHuffError::missing_code(byte))?;
                bits.write_bits(code.bits, code.length)?;
            }

            original_size += n as u64;
            on_block(n);
        }

        let encoded_bits = bits.bits_written();
        bits.flush()?;
        let stats = EncodeStats {
            original_size,
            encoded_size: bits.bytes_written(),
            encoded_bits,
        };
        debug!(
            "encoded {} bytes into {} bytes ({} bits)",
            stats.original_size, stats.encoded_size, stats.encoded_bits
        );
        Ok(stats)
    }
}

/// Encode a byte slice with the given codes.
pub fn encode(data: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffmanEncoder::new(codes, CodecConfig::DEFAULT).encode(data, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn codes_for(data: &[u8]) -> CodeTable {
        let table = FrequencyTable::from_bytes(data).unwrap();
        let tree = HuffmanTree::build(&table).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn test_encode_three_bits() {
        let data = [0x41, 0x41, 0x42];
        let codes = codes_for(&data);
        let mut output = Vec::new();
        let stats = HuffmanEncoder::new(&codes, CodecConfig::DEFAULT)
            .encode(&data[..], &mut output)
            .unwrap();

        assert_eq!(stats.original_size, 3);
        assert_eq!(stats.encoded_bits, 3);
        assert_eq!(stats.encoded_size, 1);
        assert_eq!(output.len(), 1);

        // 'B' is the left child (bit 0), 'A' the right child (bit 1): 110 + padding
        assert_eq!(output[0], 0b1100_0000);
    }

    #[test]
    fn test_encode_empty() {
        let codes = codes_for(b"");
        let output = encode(b"", &codes).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_encode_single_symbol_emits_nothing() {
        let data = vec![0x41; 1000];
        let codes = codes_for(&data);
        let mut output = Vec::new();
        let stats = HuffmanEncoder::new(&codes, CodecConfig::DEFAULT)
            .encode(&data[..], &mut output)
            .unwrap();
        assert_eq!(stats.encoded_bits, 0);
        assert!(output.is_empty());
        assert_eq!(stats.ratio(), 0.0);
    }

    #[test]
    fn test_missing_code() {
        let codes = codes_for(b"abc");
        let err = encode(b"abcd", &codes).unwrap_err();
        assert!(matches!(err, OxiHuffError::MissingCode { symbol: b'd' }));
    }

    #[test]
    fn test_progress_callback() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i % 13) as u8).collect();
        let codes = codes_for(&data);
        let config = CodecConfig::new(128).unwrap();
        let mut blocks = Vec::new();
        HuffmanEncoder::new(&codes, config)
            .encode_with_progress(&data[..], Vec::new(), |n| blocks.push(n))
            .unwrap();
        assert_eq!(blocks.iter().sum::<usize>(), 1000);
        assert_eq!(blocks.len(), 8);
    }

    #[test]
    fn test_block_size_does_not_change_output() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i * i % 97) as u8).collect();
        let codes = codes_for(&data);

        let mut small = Vec::new();
        HuffmanEncoder::new(&codes, CodecConfig::new(64).unwrap())
            .encode(&data[..], &mut small)
            .unwrap();
        let large = encode(&data, &codes).unwrap();
        assert_eq!(small, large);
    }

    #[test]
    fn test_stats_ratio() {
        let stats = EncodeStats {
            original_size: 200,
            encoded_size: 50,
            encoded_bits: 400,
        };
        assert!((stats.ratio() - 25.0).abs() < f64::EPSILON);
    }
}
