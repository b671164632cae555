//! # OxiHuff-Codec: Pure Rust Huffman Coding
//!
//! This crate provides byte-oriented Huffman compression and decompression
//! with a compact, separately stored frequency file.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Two-file format**: codes are rebuilt from a bit-packed frequency file,
//!   the payload is a bare MSB-first bitstream
//! - **Streaming**: encoder and decoder work block by block over any
//!   `Read`/`Write`
//! - **Degenerate inputs**: empty input and single-symbol input need no
//!   payload bits at all
//!
//! ## Pipeline
//!
//! ```text
//! input ─▶ FrequencyTable ─▶ HuffmanTree ─▶ CodeTable ─▶ HuffmanEncoder ─▶ payload
//!               │                 ▲
//!               ▼                 │
//!        frequency file ──────────┴──────▶ HuffmanDecoder ─▶ output
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = compress(original).unwrap();
//! let restored = decompress(&compressed.frequency_file, &compressed.payload).unwrap();
//!
//! assert_eq!(restored, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code;
mod config;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod heap;
pub mod inspect;
pub mod tree;

pub use code::{Code, CodeTable, MAX_CODE_LENGTH};
pub use config::CodecConfig;
pub use decoder::{DecodeStats, HuffmanDecoder, decode};
pub use encoder::{EncodeStats, HuffmanEncoder, encode};
pub use frequency::{FrequencyCounter, FrequencyTable};
pub use inspect::CodeEntry;
pub use oxihuff_core::error::{OxiHuffError, Result};
pub use tree::HuffmanTree;

use std::io::{Read, Write};

/// A frequency table together with the tree and codes built from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    codes: CodeTable,
}

impl HuffmanCodec {
    /// Build the tree and codes for a frequency table.
    pub fn from_frequencies(frequencies: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::build(&frequencies)?;
        let codes = CodeTable::from_tree(&tree)?;
        log::debug!(
            "codec ready: {} symbols, longest code {} bits",
            codes.len(),
            codes.max_length()
        );
        Ok(Self {
            frequencies,
            tree,
            codes,
        })
    }

    /// Count `data` and build the codec for it.
    pub fn from_data(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(FrequencyTable::from_bytes(data)?)
    }

    /// Read a serialized frequency table and build the codec for it.
    pub fn from_frequency_file<R: Read>(reader: R) -> Result<Self> {
        Self::from_frequencies(FrequencyTable::read_from(reader)?)
    }

    /// The frequency table.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// The code tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The code table.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Size of the input the frequency table describes.
    pub fn original_size(&self) -> u64 {
        self.frequencies.total()
    }

    /// Encode `reader` into `writer`.
    pub fn encode_to<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        config: CodecConfig,
    ) -> Result<EncodeStats> {
        HuffmanEncoder::new(&self.codes, config).encode(reader, writer)
    }

    /// Decode [`HuffmanCodec::original_size`] bytes from `reader` into `writer`.
    pub fn decode_to<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        config: CodecConfig,
    ) -> Result<DecodeStats> {
        HuffmanDecoder::new(&self.tree, config).decode(reader, writer, self.original_size())
    }

    /// Symbol, frequency and code of every symbol that occurs.
    pub fn inspect(&self) -> Vec<CodeEntry> {
        inspect::entries(&self.frequencies, &self.codes)
    }
}

/// The two outputs of [`compress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    /// Serialized frequency table.
    pub frequency_file: Vec<u8>,
    /// Encoded bitstream.
    pub payload: Vec<u8>,
}

/// Compress `data` into a frequency file and a payload.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::compress;
///
/// let compressed = compress(&[0x41; 1000]).unwrap();
/// // A single distinct byte needs no payload bits at all
/// assert!(compressed.payload.is_empty());
/// ```
pub fn compress(data: &[u8]) -> Result<Compressed> {
    let codec = HuffmanCodec::from_data(data)?;
    let frequency_file = codec.frequencies().to_bytes()?;
    let payload = encode(data, codec.codes())?;
    Ok(Compressed {
        frequency_file,
        payload,
    })
}

/// Rebuild the original data from a frequency file and a payload.
///
/// # Example
///
/// ```rust
/// use oxihuff_codec::{compress, decompress};
///
/// let data = b"This is a test of compression! ".repeat(10);
/// let compressed = compress(&data).unwrap();
/// let restored = decompress(&compressed.frequency_file, &compressed.payload).unwrap();
/// assert_eq!(restored, data);
/// ```
pub fn decompress(frequency_file: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let codec = HuffmanCodec::from_frequencies(FrequencyTable::from_serialized(frequency_file)?)?;
    decode(payload, codec.tree(), codec.original_size())
}
