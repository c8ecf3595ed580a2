use clap::{Args, Subcommand};
use lane_frame::MAX_CHANNEL;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod blobs;
pub mod convert;
pub mod info;
pub mod synth;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a capture and print its header and frame counts.
    Info(InfoArgs),
    /// Convert every capture in a directory to `.lane` text.
    Convert(ConvertArgs),
    /// Decode a capture and report the blobs in each frame.
    Blobs(BlobsArgs),
    /// Write a deterministic synthetic capture.
    Synth(SynthArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Info(args) => info::run(args, format),
        Command::Convert(args) => convert::run(args, format),
        Command::Blobs(args) => blobs::run(args, format),
        Command::Synth(args) => synth::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Capture file to decode.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Directory holding raw captures.
    pub input: PathBuf,
    /// Directory to write `.lane` files into. Created if missing.
    pub output: PathBuf,
    /// Extension of the captures to convert.
    #[arg(long, default_value = "ldat")]
    pub extension: String,
}

#[derive(Args, Debug)]
pub struct BlobsArgs {
    /// Capture file to decode.
    pub path: PathBuf,
    /// Minimum magnitude for a pixel to join a blob.
    #[arg(long, short = 't', default_value_t = lane_blob::DEFAULT_THRESHOLD)]
    pub threshold: u16,
    /// Only report frames from this channel.
    #[arg(
        long,
        short = 'c',
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_CHANNEL))
    )]
    pub channel: Option<u8>,
}

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// File to write.
    pub path: PathBuf,
    /// Number of frames to generate.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,
    /// Pixel clusters seeded into each frame.
    #[arg(long, default_value_t = 16)]
    pub seed_pixels: u32,
    /// Generator seed.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
