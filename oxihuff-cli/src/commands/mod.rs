//! Command implementations for OxiHuff CLI.

pub mod decode;
pub mod dump;
pub mod encode;

pub use decode::cmd_decode;
pub use dump::cmd_dump;
pub use encode::cmd_encode;

use oxihuff_codec::CodecConfig;

/// Options shared by the encode and decode commands.
pub struct CommandOptions {
    pub config: CodecConfig,
    pub progress: bool,
}
