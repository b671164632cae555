//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman codec.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and the command-line tool:
//!
//! - [`bitstream`]: MSB-first, block-buffered bit I/O
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxihuff encode / decode / dump                      │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec                                                   │
//! │     Heap, tree, codes, frequency file, transducers      │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     BitReader/BitWriter, errors                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b0110, 4).unwrap();
//! let data = writer.finish().unwrap();
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(4).unwrap(), 0b0110);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter, DEFAULT_BLOCK_SIZE};
pub use error::{OxiHuffError, Result};
