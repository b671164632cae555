//! Byte frequency table and its compact file format.
//!
//! # Frequency File Layout
//!
//! The file does not store the tree or the codes, only the counts the tree
//! is rebuilt from. It has two regions:
//!
//! 1. **Header**: one variable-length record per symbol 0..=255, packed
//!    MSB-first without padding between records:
//!
//!    | bits  | meaning                     |
//!    |-------|-----------------------------|
//!    | `0`   | frequency is zero           |
//!    | `100` | frequency stored in 1 byte  |
//!    | `101` | frequency stored in 2 bytes |
//!    | `110` | frequency stored in 3 bytes |
//!    | `111` | frequency stored in 4 bytes |
//!
//!    The last header byte is zero-padded in its low bits.
//!
//! 2. **Body**: for every symbol with a non-zero frequency, in ascending
//!    order, the frequency in big-endian using exactly the declared width.
//!
//! The original input size is not stored; it is the sum of all counts.

use log::debug;
use oxihuff_core::bitstream::{BitReader, BitWriter};
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{Cursor, Read, Write};

/// Number of symbols in the alphabet.
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence count of every byte value in some input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Create a table with every count zero.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
        }
    }

    /// Create a table from explicit counts.
    pub fn from_counts(counts: [u32; SYMBOL_COUNT]) -> Self {
        Self { counts }
    }

    /// Count the bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut counter = FrequencyCounter::new();
        counter.update(data);
        counter.finish()
    }

    /// Count the bytes produced by `reader`, reading `block_size` at a time.
    pub fn from_reader<R: Read>(reader: R, block_size: usize) -> Result<Self> {
        Self::from_reader_with_progress(reader, block_size, |_| {})
    }

    /// Count like [`FrequencyTable::from_reader`], calling `on_block` with the
    /// size of every block once it has been counted.
    pub fn from_reader_with_progress<R, F>(
        mut reader: R,
        block_size: usize,
        mut on_block: F,
    ) -> Result<Self>
    where
        R: Read,
        F: FnMut(usize),
    {
        let mut counter = FrequencyCounter::new();
        let mut block = vec![0u8; block_size.max(1)];
        loop {
            let n = match reader.read(&mut block) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            counter.update(&block[..n]);
            on_block(n);
        }
        counter.finish()
    }

    /// Count for `symbol`.
    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// All 256 counts, indexed by symbol.
    pub fn counts(&self) -> &[u32; SYMBOL_COUNT] {
        &self.counts
    }

    /// Sum of all counts, i.e. the size of the original input.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Whether every count is zero.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate over `(symbol, count)` for non-zero counts in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Size in bytes of the serialized form.
    pub fn serialized_len(&self) -> usize {
        let header_bits: usize = self
            .counts
            .iter()
            .map(|&c| if c == 0 { 1 } else { 3 })
            .sum();
        let body: usize = self.iter().map(|(_, c)| byte_width(c)).sum();
        header_bits.div_ceil(8) + body
    }

    /// Serialize into `writer`. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<usize> {
        let mut bits = BitWriter::new(writer);

        for &count in &self.counts {
            if count == 0 {
                bits.write_bit(false)?;
            } else {
                let width = byte_width(count) as u64;
                bits.write_bits(0b100 | (width - 1), 3)?;
            }
        }
        bits.align_to_byte()?;

        for (_, count) in self.iter() {
            let width = byte_width(count);
            for &byte in &count.to_be_bytes()[4 - width..] {
                bits.write_byte(byte)?;
            }
        }

        bits.flush()?;
        let written = bits.bytes_written() as usize;
        debug!(
            "frequency table: {} symbols, {} bytes serialized",
            self.distinct(),
            written
        );
        Ok(written)
    }

    /// Serialize into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.serialized_len());
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Deserialize a table from `reader`.
    ///
    /// Bytes after the body are left unread.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        // Byte-at-a-time refills keep the reader positioned right after the body.
        let mut bits = BitReader::with_block_size(reader, 1);
        let mut widths = [0usize; SYMBOL_COUNT];

        for symbol in 0..SYMBOL_COUNT {
            // Fewest header bits still needed from this point on.
            let still_needed = |extra: usize| (SYMBOL_COUNT - symbol + extra).div_ceil(8);

            let present = bits
                .read_bit()
                .map_err(|e| truncated_or(e, "header", still_needed(0)))?;
            if present {
                let class = bits
                    .read_bits(2)
                    .map_err(|e| truncated_or(e, "header", still_needed(2)))?;
                widths[symbol] = class as usize + 1;
            }
        }

        let mut counts = [0u32; SYMBOL_COUNT];
        for symbol in 0..SYMBOL_COUNT {
            let width = widths[symbol];
            if width == 0 {
                continue;
            }
            let mut buf = [0u8; 4];
            bits.read_bytes(&mut buf[4 - width..]).map_err(|e| {
                let remaining: usize = widths[symbol..].iter().sum();
                truncated_or(e, "body", remaining)
            })?;
            counts[symbol] = u32::from_be_bytes(buf);
        }

        let table = Self { counts };
        debug!(
            "frequency table read: {} symbols, original size {}",
            table.distinct(),
            table.total()
        );
        Ok(table)
    }

    /// Deserialize a table from a byte slice.
    pub fn from_serialized(data: &[u8]) -> Result<Self> {
        Self::read_from(Cursor::new(data))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental byte counter for block-wise scanning.
#[derive(Debug, Clone)]
pub struct FrequencyCounter {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyCounter {
    /// Create a counter with every count zero.
    pub fn new() -> Self {
        Self {
            counts: [0; SYMBOL_COUNT],
        }
    }

    /// Add the bytes of one block.
    pub fn update(&mut self, block: &[u8]) {
        for &byte in block {
            self.counts[byte as usize] += 1;
        }
    }

    /// Number of bytes counted so far.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Produce the table, failing if any count does not fit in 32 bits.
    pub fn finish(self) -> Result<FrequencyTable> {
        let mut counts = [0u32; SYMBOL_COUNT];
        for (symbol, (&wide, narrow)) in self.counts.iter().zip(counts.iter_mut()).enumerate() {
            *narrow = u32::try_from(wide)
                .map_err(|_| OxiHuffError::frequency_overflow(symbol as u8))?;
        }
        Ok(FrequencyTable { counts })
    }
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimum number of bytes (1-4) needed to hold `count`.
pub fn byte_width(count: u32) -> usize {
    ((32 - count.leading_zeros() as usize).div_ceil(8)).max(1)
}

fn truncated_or(err: OxiHuffError, section: &'static str, expected: usize) -> OxiHuffError {
    if err.is_eof() {
        OxiHuffError::truncated(section, expected)
    } else {
        err
    }
}
