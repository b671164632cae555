//! Decode command implementation.

use super::CommandOptions;
use crate::utils::{create_output, create_progress_bar, open_input, percent};
use oxihuff_codec::{HuffmanCodec, HuffmanDecoder};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Restore `output` from the bitstream `bin` and its frequency table `frq`.
pub fn cmd_decode(
    output: &Path,
    bin: &Path,
    frq: &Path,
    options: &CommandOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec = HuffmanCodec::from_frequency_file(BufReader::new(open_input(frq)?))?;
    let original_size = codec.original_size();
    log::debug!(
        "{}: {} symbols, {} bytes to decode",
        frq.display(),
        codec.codes().len(),
        original_size
    );

    let reader = open_input(bin)?;
    let writer = BufWriter::new(create_output(output)?);

    let pb = create_progress_bar(original_size, options.progress);
    pb.set_message("decoding");
    let stats = HuffmanDecoder::new(codec.tree(), options.config).decode_with_progress(
        reader,
        writer,
        original_size,
        |n| pb.inc(n as u64),
    )?;
    pb.finish_and_clear();

    println!(
        "{}: {} bytes ({:.2}%) -> {}: {} bytes",
        bin.display(),
        stats.encoded_size(),
        percent(stats.encoded_size(), stats.decoded_size),
        output.display(),
        stats.decoded_size
    );

    Ok(())
}
