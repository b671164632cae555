//! Bit-level I/O operations for Huffman coding.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level over any `Read`/`Write` implementation.
//!
//! # Bit Ordering
//!
//! OxiHuff uses MSB-first (Most Significant Bit first) ordering within
//! bytes: the first bit written lands in bit 7 of the first byte. A trailing
//! partial byte is left-aligned and its low bits are zero.
//!
//! # Buffering
//!
//! Both types move bytes through a fixed-size block buffer, so the
//! underlying stream sees one large `read`/`write` per block. The block size
//! affects throughput only; the bit sequence is the same for every size.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//! writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Default block size for buffered bit I/O (8 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 8 * 1024;

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader one block at a time and
/// consumed bit by bit from the most significant end.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Block buffer.
    block: Vec<u8>,
    /// Next unread byte in `block`.
    pos: usize,
    /// Number of valid bytes in `block`.
    filled: usize,
    /// Byte currently being consumed.
    current: u8,
    /// Bits of `current` already consumed (8 = none left).
    bit_cursor: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` with the default block size.
    pub fn new(reader: R) -> Self {
        Self::with_block_size(reader, DEFAULT_BLOCK_SIZE)
    }

    /// Create a new `BitReader` that refills `block_size` bytes at a time.
    pub fn with_block_size(reader: R, block_size: usize) -> Self {
        Self {
            reader,
            block: vec![0; block_size.max(1)],
            pos: 0,
            filled: 0,
            current: 0,
            bit_cursor: 8,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Bytes already pulled into the block buffer are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Refill the block buffer. Returns `false` at end of input.
    fn refill(&mut self) -> Result<bool> {
        loop {
            match self.reader.read(&mut self.block) {
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(n > 0);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Take the next whole byte from the block buffer.
    #[inline]
    fn next_byte(&mut self) -> Result<u8> {
        if self.pos == self.filled && !self.refill()? {
            return Err(OxiHuffError::unexpected_eof(self.total_bits_read));
        }
        let byte = self.block[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_cursor == 8 {
            self.current = self.next_byte()?;
            self.bit_cursor = 0;
        }
        let bit = self.current & (0x80 >> self.bit_cursor) != 0;
        self.bit_cursor += 1;
        self.total_bits_read += 1;
        Ok(bit)
    }

    /// Read up to 32 bits from the stream.
    ///
    /// The first bit read ends up in the most significant position of the
    /// returned `count`-bit value.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }

    /// Discard the unread bits of the current byte.
    pub fn align_to_byte(&mut self) {
        if self.bit_cursor < 8 {
            self.total_bits_read += (8 - self.bit_cursor) as u64;
            self.bit_cursor = 8;
        }
    }

    /// Read whole bytes, discarding any partial bits first.
    ///
    /// Fails with [`OxiHuffError::UnexpectedEof`] if the input ends before
    /// `buf` is full.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.align_to_byte();

        let mut offset = 0;
        while offset < buf.len() {
            if self.pos == self.filled && !self.refill()? {
                return Err(OxiHuffError::unexpected_eof(self.total_bits_read));
            }
            let n = (self.filled - self.pos).min(buf.len() - offset);
            buf[offset..offset + n].copy_from_slice(&self.block[self.pos..self.pos + n]);
            self.pos += n;
            offset += n;
            self.total_bits_read += n as u64 * 8;
        }
        Ok(())
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits MSB-first and hands complete blocks to the
/// underlying writer. Call [`BitWriter::finish`] (or [`BitWriter::flush`])
/// when done; bits still buffered when the writer is dropped are discarded.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Completed bytes waiting to be written.
    block: Vec<u8>,
    /// Flush threshold for `block`.
    block_size: usize,
    /// Partial byte (right-aligned).
    current: u32,
    /// Number of bits in `current` (0-7).
    bits_in_current: u8,
    /// Total bits written.
    total_bits_written: u64,
    /// Bytes handed to the underlying writer.
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` with the default block size.
    pub fn new(writer: W) -> Self {
        Self::with_block_size(writer, DEFAULT_BLOCK_SIZE)
    }

    /// Create a new `BitWriter` that writes `block_size` bytes at a time.
    pub fn with_block_size(writer: W, block_size: usize) -> Self {
        let block_size = block_size.max(1);
        Self {
            writer,
            block: Vec::with_capacity(block_size),
            block_size,
            current: 0,
            bits_in_current: 0,
            total_bits_written: 0,
            bytes_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Get the number of bytes handed to the underlying writer.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Write the block buffer to the underlying writer.
    fn drain_block(&mut self) -> Result<()> {
        if !self.block.is_empty() {
            self.writer.write_all(&self.block)?;
            self.bytes_written += self.block.len() as u64;
            self.block.clear();
        }
        Ok(())
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.block.push(byte);
        if self.block.len() >= self.block_size {
            self.drain_block()?;
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.current = (self.current << 1) | bit as u32;
        self.bits_in_current += 1;
        self.total_bits_written += 1;

        if self.bits_in_current == 8 {
            let byte = self.current as u8;
            self.current = 0;
            self.bits_in_current = 0;
            self.push_byte(byte)?;
        }
        Ok(())
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write (right-aligned)
    /// * `count` - Number of bits to write (0-64)
    pub fn write_bits(&mut self, value: u64, count: u8) -> Result<()> {
        debug_assert!(count <= 64, "Cannot write more than 64 bits at once");

        let mut remaining = count;
        while remaining > 0 {
            let space = 8 - self.bits_in_current;
            let take = space.min(remaining);
            let chunk = (value >> (remaining - take)) & ((1u64 << take) - 1);

            self.current = (self.current << take) | chunk as u32;
            self.bits_in_current += take;
            self.total_bits_written += take as u64;
            remaining -= take;

            if self.bits_in_current == 8 {
                let byte = self.current as u8;
                self.current = 0;
                self.bits_in_current = 0;
                self.push_byte(byte)?;
            }
        }
        Ok(())
    }

    /// Write a whole byte at the current bit position.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bits(byte as u64, 8)
    }

    /// Pad the partial byte with zeros in its low bits.
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bits_in_current > 0 {
            let byte = (self.current << (8 - self.bits_in_current)) as u8;
            self.current = 0;
            self.bits_in_current = 0;
            self.push_byte(byte)?;
        }
        Ok(())
    }

    /// Flush all buffered bits to the underlying writer.
    ///
    /// A partial byte is padded with zeros to complete it.
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.drain_block()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
