use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// memtap - randomized sparse sampling from file-backed address spaces
#[derive(Debug, Parser)]
#[command(name = "memtap", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pull random bytes out of a file treated as an address space.
    Sample {
        /// Path to the image file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Number of bytes to sample.
        #[arg(short, long, default_value_t = 16)]
        length: usize,

        /// Entropy algorithm: chacha8, chacha12, or chacha20.
        #[arg(long, default_value = "chacha20")]
        algorithm: String,

        /// Additional seed material mixed into the generator.
        #[arg(long, value_name = "TEXT")]
        seed: Option<String>,

        /// Distance between synthesized symbols in bytes.
        #[arg(long, default_value_t = 4096)]
        stride: usize,

        /// Base address of the image's first byte.
        #[arg(long, default_value_t = 0)]
        base: u64,

        /// Population estimate override; defaults to the synthesized symbol count.
        #[arg(long)]
        population: Option<u64>,
    },

    /// List the symbol table synthesized over an image file.
    Symbols {
        /// Path to the image file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Distance between synthesized symbols in bytes.
        #[arg(long, default_value_t = 4096)]
        stride: usize,

        /// Base address of the image's first byte.
        #[arg(long, default_value_t = 0)]
        base: u64,

        /// Show at most this many entries.
        #[arg(long, default_value_t = 32)]
        limit: usize,
    },
}
