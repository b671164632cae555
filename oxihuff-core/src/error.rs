//! Error types for OxiHuff operations.
//!
//! A single error enum covers the whole pipeline: opening files, reading the
//! frequency file, building the code tree and running the bit-level
//! transducers. Every failure is a deterministic function of the input, so
//! nothing here is retryable.

use std::io;
use std::path::Path;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input path could not be opened because it does not exist.
    #[error("Couldn't open the file: {path}")]
    ResourceNotFound {
        /// The path that was requested.
        path: String,
    },

    /// The frequency file ended before all data was read.
    #[error("Truncated frequency file: {section} needs {expected} more bytes")]
    FormatTruncated {
        /// Region of the file being read ("header" or "body").
        section: &'static str,
        /// Number of bytes that were still expected.
        expected: usize,
    },

    /// A bounded container was asked to hold more than it can.
    #[error("Capacity exceeded: limit is {capacity} entries")]
    CapacityExceeded {
        /// Maximum number of entries.
        capacity: usize,
    },

    /// The encoded bitstream ran out before all symbols were decoded.
    #[error("Premature end of bitstream: decoded {decoded} of {expected} symbols")]
    PrematureEndOfBitstream {
        /// Number of symbols produced before the input ran out.
        decoded: u64,
        /// Number of symbols that were requested.
        expected: u64,
    },

    /// Low-level end of input inside the bit reader.
    #[error("Unexpected end of bitstream at bit position {bit_position}")]
    UnexpectedEof {
        /// Bit position where the input ran out.
        bit_position: u64,
    },

    /// A generated code does not fit into a code word.
    #[error("Code for symbol {symbol:#04x} is {length} bits long (max {max})")]
    CodeTooLong {
        /// Symbol whose code is too long.
        symbol: u8,
        /// Length of the root-to-leaf path.
        length: usize,
        /// Maximum supported code length.
        max: usize,
    },

    /// The encoder was given a byte that has no code.
    #[error("No code for symbol {symbol:#04x}")]
    MissingCode {
        /// The byte that could not be encoded.
        symbol: u8,
    },

    /// The code tree cannot be used for the requested operation.
    #[error("Invalid code tree: {message}")]
    InvalidTree {
        /// Description of the problem.
        message: String,
    },

    /// A symbol occurred more often than a frequency entry can record.
    #[error("Frequency of symbol {symbol:#04x} exceeds the 32-bit range")]
    FrequencyOverflow {
        /// The overflowing symbol.
        symbol: u8,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Classify an error from opening `path`.
    ///
    /// A missing file becomes [`OxiHuffError::ResourceNotFound`]; anything
    /// else stays an I/O error.
    pub fn open_error(path: impl AsRef<Path>, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::ResourceNotFound {
                path: path.as_ref().display().to_string(),
            }
        } else {
            Self::Io(err)
        }
    }

    /// Create a truncated format error.
    pub fn truncated(section: &'static str, expected: usize) -> Self {
        Self::FormatTruncated { section, expected }
    }

    /// Create a capacity exceeded error.
    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::CapacityExceeded { capacity }
    }

    /// Create a premature end of bitstream error.
    pub fn premature_end(decoded: u64, expected: u64) -> Self {
        Self::PrematureEndOfBitstream { decoded, expected }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Create a code too long error.
    pub fn code_too_long(symbol: u8, length: usize, max: usize) -> Self {
        Self::CodeTooLong {
            symbol,
            length,
            max,
        }
    }

    /// Create a missing code error.
    pub fn missing_code(symbol: u8) -> Self {
        Self::MissingCode { symbol }
    }

    /// Create an invalid tree error.
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree {
            message: message.into(),
        }
    }

    /// Create a frequency overflow error.
    pub fn frequency_overflow(symbol: u8) -> Self {
        Self::FrequencyOverflow { symbol }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error means the input ran out of data.
    pub fn is_eof(&self) -> bool {
        match self {
            Self::UnexpectedEof { .. } => true,
            Self::Io(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}
