//! Read-only view of a built code for diagnostic dumps.

use crate::code::{Code, CodeTable};
use crate::frequency::FrequencyTable;
use std::fmt;

/// One symbol's frequency and code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    /// The byte value.
    pub symbol: u8,
    /// How often it occurs.
    pub frequency: u32,
    /// Its Huffman code.
    pub code: Code,
}

impl CodeEntry {
    /// The symbol as a printable character; control bytes show as a space.
    pub fn printable(&self) -> char {
        if self.symbol < 0x20 {
            ' '
        } else {
            self.symbol as char
        }
    }
}

impl fmt::Display for CodeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Code: {:#x}\tChar: '{}'\tFrqncy: {}\tHuffman Code: {}",
            self.symbol,
            self.printable(),
            self.frequency,
            self.code
        )
    }
}

/// Every symbol with a non-zero frequency, in ascending order.
pub fn entries(frequencies: &FrequencyTable, codes: &CodeTable) -> Vec<CodeEntry> {
    frequencies
        .iter()
        .filter_map(|(symbol, frequency)| {
            codes.get(symbol).map(|code| CodeEntry {
                symbol,
                frequency,
                code,
            })
        })
        .collect()
}
