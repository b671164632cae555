//! Code table generation from a Huffman tree.
//!
//! Each leaf's code is its root-to-leaf path, 0 for a left branch and 1 for
//! a right branch, read most significant bit first.
//!
//! # Code length ceiling
//!
//! Code words are `u64`, so a code may be up to [`MAX_CODE_LENGTH`] bits.
//! A leaf at depth `d` needs a tree total of at least `Fib(d + 2)`, and with
//! 256 counts of at most `u32::MAX` the total stays below 2^40, which keeps
//! every reachable depth under 64. Deeper paths are reported as
//! [`OxiHuffError::CodeTooLong`] instead of being truncated.

use crate::frequency::{FrequencyTable, SYMBOL_COUNT};
use crate::tree::{HuffmanTree, NodeKind};
use log::trace;
use oxihuff_core::error::{OxiHuffError, Result};
use std::fmt;

/// Longest code the table can hold.
pub const MAX_CODE_LENGTH: usize = 64;

/// A single Huffman code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// Number of bits in the code.
    pub length: u8,
    /// The code bits, right-aligned.
    pub bits: u64,
}

impl Code {
    /// Render the code as a string of `0` and `1`.
    pub fn to_bit_string(&self) -> String {
        (0..self.length)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// Whether `self` is a proper or equal bit-prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length <= other.length
            && other
                .bits
                .checked_shr((other.length - self.length) as u32)
                .unwrap_or(0)
                == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Code for every symbol present in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// Generate the codes for `tree` with a pre-order walk.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; SYMBOL_COUNT];

        if let Some(symbol) = tree.single_symbol() {
            // One leaf: nothing to distinguish, so the code is empty.
            codes[symbol as usize] = Some(Code { length: 0, bits: 0 });
            return Ok(Self { codes });
        }

        let mut stack = vec![(tree.root(), 0usize, 0u64)];
        while let Some((id, length, bits)) = stack.pop() {
            match tree.node(id).kind {
                NodeKind::Leaf { symbol } => {
                    trace!("symbol {:#04x}: {} bits", symbol, length);
                    codes[symbol as usize] = Some(Code {
                        length: length as u8,
                        bits,
                    });
                }
                NodeKind::Internal { left, right } => {
                    let children = [(right, 1u64), (left, 0u64)];
                    for (child, bit) in children {
                        let Some(child) = child else { continue };
                        if length + 1 > MAX_CODE_LENGTH {
                            let symbol = first_leaf(tree, child);
                            return Err(OxiHuffError::code_too_long(
                                symbol,
                                length + 1,
                                MAX_CODE_LENGTH,
                            ));
                        }
                        // Right is pushed first so the left subtree is visited first.
                        stack.push((child, length + 1, (bits << 1) | bit));
                    }
                }
            }
        }

        Ok(Self { codes })
    }

    /// Code for `symbol`, if it occurs.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Iterate over `(symbol, code)` in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest code.
    pub fn max_length(&self) -> u8 {
        self.iter().map(|(_, c)| c.length).max().unwrap_or(0)
    }

    /// Total encoded size in bits: the sum of `count * length`.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| frequencies.get(symbol) as u64 * code.length as u64)
            .sum()
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

/// Leftmost leaf below `id`, used to name the symbol in an error.
fn first_leaf(tree: &HuffmanTree, mut id: usize) -> u8 {
    loop {
        match tree.node(id).kind {
            NodeKind::Leaf { symbol } => return symbol,
            NodeKind::Internal { left, right } => match left.or(right) {
                Some(next) => id = next,
                None => return 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_for(pairs: &[(u8, u32)]) -> (FrequencyTable, CodeTable) {
        let mut counts = [0u32; 256];
        for &(symbol, count) in pairs {
            counts[symbol as usize] = count;
        }
        let table = FrequencyTable::from_counts(counts);
        let tree = HuffmanTree::build(&table).unwrap();
        let codes = CodeTable::from_tree(&tree).unwrap();
        (table, codes)
    }

    #[test]
    fn test_empty_table() {
        let (_, codes) = codes_for(&[]);
        assert!(codes.is_empty());
        assert_eq!(codes.max_length(), 0);
    }

    #[test]
    fn test_single_symbol_has_empty_code() {
        let (table, codes) = codes_for(&[(0x41, 1000)]);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(0x41), Some(Code { length: 0, bits: 0 }));
        assert_eq!(codes.weighted_length(&table), 0);
    }

    #[test]
    fn test_two_symbols() {
        let (_, codes) = codes_for(&[(0x41, 2), (0x42, 1)]);
        let a = codes.get(0x41).unwrap();
        let b = codes.get(0x42).unwrap();
        assert_eq!(a.length, 1);
        assert_eq!(b.length, 1);
        assert_ne!(a.bits, b.bits);
    }

    #[test]
    fn test_classic_example_lengths() {
        // f:45 c:12 b:13 d:16 e:9 a:5
        let (table, codes) = codes_for(&[
            (b'a', 5),
            (b'b', 13),
            (b'c', 12),
            (b'd', 16),
            (b'e', 9),
            (b'f', 45),
        ]);
        assert_eq!(codes.get(b'f').unwrap().length, 1);
        assert_eq!(codes.get(b'a').unwrap().length, 4);
        assert_eq!(codes.get(b'e').unwrap().length, 4);
        assert_eq!(codes.weighted_length(&table), 224);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_codes_follow_tree_paths() {
        let (_, codes) = codes_for(&[(1, 1), (2, 1), (3, 2)]);
        // 1+1 -> internal(2); then leaf 3 (2) vs internal (2)
        let mut lengths: Vec<u8> = codes.iter().map(|(_, c)| c.length).collect();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 2, 2]);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_bit_string() {
        let code = Code {
            length: 5,
            bits: 0b00101,
        };
        assert_eq!(code.to_bit_string(), "00101");
        assert_eq!(code.to_string(), "00101");
        assert_eq!(Code { length: 0, bits: 0 }.to_bit_string(), "");
    }

    #[test]
    fn test_prefix_relation() {
        let short = Code {
            length: 2,
            bits: 0b10,
        };
        let long = Code {
            length: 4,
            bits: 0b1011,
        };
        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        let other = Code {
            length: 4,
            bits: 0b0011,
        };
        assert!(!short.is_prefix_of(&other));
    }

    #[test]
    fn test_deep_tree_fits_u64() {
        // Fibonacci counts up to the u32 limit: the deepest realistic tree
        let mut pairs = Vec::new();
        let (mut a, mut b) = (1u64, 1u64);
        let mut symbol = 0u8;
        while a <= u32::MAX as u64 {
            pairs.push((symbol, a as u32));
            symbol += 1;
            let next = a + b;
            a = b;
            b = next;
        }
        let (_, codes) = codes_for(&pairs);
        assert!(codes.max_length() as usize > 32);
        assert!((codes.max_length() as usize) < MAX_CODE_LENGTH);
        assert!(codes.is_prefix_free());
    }
}
