//! OxiHuff CLI - Huffman file compressor
//!
//! Encodes a file into a bare bitstream plus a compact frequency file, and
//! decodes the pair back into the original bytes.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{CommandOptions, cmd_decode, cmd_dump, cmd_encode};
use oxihuff_codec::CodecConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust Huffman file compressor")]
#[command(long_about = "
OxiHuff compresses a file with a Huffman code built from its byte
frequencies. The encoded data and the frequency table are written to
separate files; both are needed to decode.

Examples:
  oxihuff encode
  oxihuff encode book.txt book.bin book.frq
  oxihuff decode book.out book.bin book.frq
  oxihuff dump book.frq
  oxihuff dump book.frq --json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Hide the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// I/O block size in bytes
    #[arg(long, global = true, default_value_t = CodecConfig::DEFAULT.block_size())]
    block_size: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a bitstream and a frequency file
    #[command(alias = "e")]
    Encode {
        /// File to compress
        #[arg(default_value = "huffman.in")]
        input: PathBuf,

        /// Encoded data output
        #[arg(default_value = "huffman.bin")]
        bin: PathBuf,

        /// Frequency table output
        #[arg(default_value = "huffman.frq")]
        frq: PathBuf,
    },

    /// Restore a file from a bitstream and its frequency file
    #[command(alias = "d")]
    Decode {
        /// Restored file
        #[arg(default_value = "huffman.out")]
        output: PathBuf,

        /// Encoded data input
        #[arg(default_value = "huffman.bin")]
        bin: PathBuf,

        /// Frequency table input
        #[arg(default_value = "huffman.frq")]
        frq: PathBuf,
    },

    /// Print the frequencies and codes stored in a frequency file
    Dump {
        /// Frequency table input
        #[arg(default_value = "huffman.frq")]
        frq: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = CommandOptions {
        config: CodecConfig::new(cli.block_size)?,
        progress: !cli.quiet,
    };

    match &cli.command {
        Commands::Encode { input, bin, frq } => cmd_encode(input, bin, frq, &options),
        Commands::Decode { output, bin, frq } => cmd_decode(output, bin, frq, &options),
        Commands::Dump { frq, json } => cmd_dump(frq, *json),
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logger(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
