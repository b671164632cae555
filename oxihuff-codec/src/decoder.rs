//! Huffman decoder (bitstream to raw bytes).
//!
//! The encoded stream carries no length or terminator; the caller supplies
//! the number of symbols to produce, normally [`FrequencyTable::total`]
//! of the matching frequency file.
//!
//! [`FrequencyTable::total`]: crate::frequency::FrequencyTable::total

use crate::config::CodecConfig;
use crate::tree::{HuffmanTree, NodeKind};
use log::debug;
use oxihuff_core::bitstream::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{Read, Write};

/// Sizes reported after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    /// Number of bytes produced.
    pub decoded_size: u64,
    /// Number of code bits consumed.
    pub bits_consumed: u64,
}

impl DecodeStats {
    /// Number of encoded bytes the consumed bits span.
    pub fn encoded_size(&self) -> u64 {
        self.bits_consumed.div_ceil(8)
    }
}

/// Huffman decoder walking a [`HuffmanTree`].
#[derive(Debug)]
pub struct HuffmanDecoder<'a> {
    tree: &'a HuffmanTree,
    config: CodecConfig,
}

impl<'a> HuffmanDecoder<'a> {
    /// Create a decoder for the given tree.
    pub fn new(tree: &'a HuffmanTree, config: CodecConfig) -> Self {
        Self { tree, config }
    }

    /// Decode exactly `original_size` bytes from `reader` into `writer`.
    pub fn decode<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        original_size: u64,
    ) -> Result<DecodeStats> {
        self.decode_with_progress(reader, writer, original_size, |_| {})
    }

    /// Decode like [`HuffmanDecoder::decode`], calling `on_block` with the
    /// size of every output block once it has been written.
    ///
    /// # Errors
    ///
    /// - [`OxiHuffError::PrematureEndOfBitstream`] if the input runs out
    ///   before `original_size` symbols were produced
    /// - [`OxiHuffError::InvalidTree`] if the tree has no leaves but output
    ///   was requested, or a bit leads to a missing child
    pub fn decode_with_progress<R, W, F>(
        &self,
        reader: R,
        mut writer: W,
        original_size: u64,
        mut on_block: F,
    ) -> Result<DecodeStats>
    where
        R: Read,
        W: Write,
        F: FnMut(usize),
    {
        let block_size = self.config.block_size();
        let mut out = Vec::with_capacity(block_size);

        if original_size == 0 {
            writer.flush()?;
            return Ok(DecodeStats::default());
        }

        if let Some(symbol) = self.tree.single_symbol() {
            // Zero-length code: every symbol is the same and no bits are read.
            let mut remaining = original_size;
            while remaining > 0 {
                let n = remaining.min(block_size as u64) as usize;
                out.clear();
                out.resize(n, symbol);
                writer.write_all(&out)?;
                on_block(n);
                remaining -= n as u64;
            }
            writer.flush()?;
            return Ok(DecodeStats {
                decoded_size: original_size,
                bits_consumed: 0,
            });
        }

        if self.tree.is_empty() {
            return Err(OxiHuffError::invalid_tree(format!(
                "no symbols to decode {} bytes from",
                original_size
            )));
        }

        let mut bits = BitReader::with_block_size(reader, block_size);
        let root = self.tree.root();

        for decoded in 0..original_size {
            let mut id = root;
            let symbol = loop {
                let node = self.tree.node(id);
                if let NodeKind::Leaf { symbol } = node.kind {
                    break symbol;
                }
                let bit = bits.read_bit().map_err(|e| {
                    if e.is_eof() {
                        OxiHuffError::premature_end(decoded, original_size)
                    } else {
                        e
                    }
                })?;
                id = node.child(bit).ok_or_else(|| {
                    OxiHuffError::invalid_tree(format!(
                        "bit {} at position {} leads nowhere",
                        bit as u8,
                        bits.bits_read() - 1
                    ))
                })?;
            };

            out.push(symbol);
            if out.len() == block_size {
                writer.write_all(&out)?;
                on_block(out.len());
                out.clear();
            }
        }

        if !out.is_empty() {
            writer.write_all(&out)?;
            on_block(out.len());
        }
        writer.flush()?;

        let stats = DecodeStats {
            decoded_size: original_size,
            bits_consumed: bits.bits_read(),
        };
        debug!(
            "decoded {} bytes from {} bits",
            stats.decoded_size, stats.bits_consumed
        );
        Ok(stats)
    }
}

/// Decode `original_size` bytes from a byte slice.
pub fn decode(data: &[u8], tree: &HuffmanTree, original_size: u64) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(original_size.min(1 << 24) as usize);
    HuffmanDecoder::new(tree, CodecConfig::DEFAULT).decode(data, &mut output, original_size)?;
    Ok(output)
}
