//! Codec configuration.

use oxihuff_core::bitstream::DEFAULT_BLOCK_SIZE;
use oxihuff_core::error::{OxiHuffError, Result};

/// Codec configuration parameters.
///
/// Only [`CodecConfig::new`] and the presets construct a value, so the block
/// size is always within `MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    block_size: usize,
}

impl CodecConfig {
    /// Smallest accepted block size.
    pub const MIN_BLOCK_SIZE: usize = 64;

    /// Largest accepted block size (1 MiB).
    pub const MAX_BLOCK_SIZE: usize = 1024 * 1024;

    /// Standard configuration: 8 KiB blocks.
    pub const DEFAULT: Self = Self {
        block_size: DEFAULT_BLOCK_SIZE,
    };

    /// Create a configuration with the given block size.
    pub fn new(block_size: usize) -> Result<Self> {
        if !(Self::MIN_BLOCK_SIZE..=Self::MAX_BLOCK_SIZE).contains(&block_size) {
            return Err(OxiHuffError::invalid_config(format!(
                "block size {} outside {}..={}",
                block_size,
                Self::MIN_BLOCK_SIZE,
                Self::MAX_BLOCK_SIZE
            )));
        }
        Ok(Self { block_size })
    }

    /// Size in bytes of the I/O blocks used by the encoder and decoder.
    ///
    /// Only throughput depends on this value; the encoded bits do not.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
