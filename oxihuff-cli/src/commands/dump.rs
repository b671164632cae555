//! Dump command implementation.

use crate::utils::open_input;
use oxihuff_codec::{CodeEntry, HuffmanCodec};
use serde::Serialize;
use std::io::BufReader;
use std::path::Path;

/// JSON serializable symbol row.
#[derive(Debug, Serialize)]
struct EntryJson {
    symbol: u8,
    #[serde(rename = "char")]
    character: String,
    frequency: u32,
    length: u8,
    code: String,
}

impl EntryJson {
    fn from_entry(entry: &CodeEntry) -> Self {
        Self {
            symbol: entry.symbol,
            character: entry.printable().to_string(),
            frequency: entry.frequency,
            length: entry.code.length,
            code: entry.code.to_bit_string(),
        }
    }
}

/// JSON output for a frequency file.
#[derive(Debug, Serialize)]
struct DumpJson {
    file: String,
    original_size: u64,
    symbols: usize,
    max_code_length: u8,
    encoded_bits: u64,
    entries: Vec<EntryJson>,
}

/// Print the frequencies and codes described by `frq`.
pub fn cmd_dump(frq: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let codec = HuffmanCodec::from_frequency_file(BufReader::new(open_input(frq)?))?;
    let entries = codec.inspect();

    if json {
        let output = DumpJson {
            file: frq.display().to_string(),
            original_size: codec.original_size(),
            symbols: entries.len(),
            max_code_length: codec.codes().max_length(),
            encoded_bits: codec.codes().weighted_length(codec.frequencies()),
            entries: entries.iter().map(EntryJson::from_entry).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", render_text(frq, codec.original_size(), &entries));
    Ok(())
}

/// Plain-text listing: file name, original size, then one line per symbol.
fn render_text(frq: &Path, original_size: u64, entries: &[CodeEntry]) -> String {
    let mut out = format!(
        "Dumping file {}\nOriginal Size: {}\nList of Frequency and Huffman Code. . .\n",
        frq.display(),
        original_size
    );
    for entry in entries {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}
