//! Encode command implementation.

use super::CommandOptions;
use crate::utils::{create_output, create_progress_bar, open_input, percent};
use oxihuff_codec::{FrequencyTable, HuffmanCodec, HuffmanEncoder};
use std::io::BufWriter;
use std::path::Path;

/// Compress `input` into `bin`, writing its frequency table to `frq`.
///
/// The input is read twice: once to count byte frequencies and once to
/// encode it with the codes built from those counts.
pub fn cmd_encode(
    input: &Path,
    bin: &Path,
    frq: &Path,
    options: &CommandOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = open_input(input)?.metadata()?.len();
    let pb = create_progress_bar(size * 2, options.progress);

    pb.set_message("counting");
    let table = FrequencyTable::from_reader_with_progress(
        open_input(input)?,
        options.config.block_size(),
        |n| pb.inc(n as u64),
    )?;
    log::debug!(
        "{}: {} bytes, {} distinct symbols",
        input.display(),
        table.total(),
        table.distinct()
    );

    let frq_size = table.write_to(BufWriter::new(create_output(frq)?))?;
    let codec = HuffmanCodec::from_frequencies(table)?;

    pb.set_message("encoding");
    let writer = BufWriter::new(create_output(bin)?);
    let stats = HuffmanEncoder::new(codec.codes(), options.config).encode_with_progress(
        open_input(input)?,
        writer,
        |n| pb.inc(n as u64),
    )?;
    pb.finish_and_clear();

    if stats.original_size != codec.original_size() {
        log::warn!(
            "{} changed while encoding: counted {} bytes, encoded {}",
            input.display(),
            codec.original_size(),
            stats.original_size
        );
    }

    println!("{}: {} bytes", input.display(), stats.original_size);
    println!(
        "{}: {} bytes ({:.2}%)",
        bin.display(),
        stats.encoded_size,
        stats.ratio()
    );
    println!(
        "{}: {} bytes ({:.2}%)",
        frq.display(),
        frq_size,
        percent(frq_size as u64, stats.original_size)
    );

    Ok(())
}
