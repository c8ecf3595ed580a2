use lane_frame::{ChannelStore, Frame, PixelKey, CHANNEL_COUNT};
use lane_lucid::{CompressionMode, FileHeader, LucidWriter, PAYLOAD_MAX};
use serde::Serialize;
use tracing::info;

use crate::cmd::SynthArgs;
use crate::exit::{io_error, lucid_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

/// Start time stamped on synthetic captures.
const SYNTH_START_TIME: u32 = 1_400_000_000;

/// Largest magnitude given to a seed pixel.
const MAX_SEED_MAGNITUDE: u32 = 1_000;

#[derive(Serialize)]
struct SynthOutput {
    path: String,
    frames: usize,
    pixels: usize,
    bytes: usize,
}

/// Linear congruential generator. Output depends only on the seed, so the
/// same arguments always produce the same file.
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

pub fn run(args: SynthArgs, format: OutputFormat) -> CliResult<i32> {
    let store = generate(args.frames, args.seed_pixels, args.seed);
    let header = FileHeader {
        chip_active: [true; CHANNEL_COUNT],
        compressed: true,
        compression_mode: CompressionMode::Rle,
        shutter_rate: 10,
        start_time: SYNTH_START_TIME,
        file_id: (args.seed & 0xFFFF_FFFF) as u32,
        ..FileHeader::default()
    };

    let context = args.path.display().to_string();
    let bytes =
        LucidWriter::encode_file(&header, &store).map_err(|err| lucid_error(&context, err))?;
    std::fs::write(&args.path, &bytes).map_err(|err| io_error(&context, err))?;
    info!(path = %context, frames = store.frame_count(), "wrote synthetic capture");

    let out = SynthOutput {
        path: context,
        frames: store.frame_count(),
        pixels: store.iter_frames().map(Frame::len).sum(),
        bytes: bytes.len(),
    };
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table | OutputFormat::Pretty => println!(
            "wrote {} ({} frames, {} pixels, {} bytes)",
            out.path, out.frames, out.pixels, out.bytes
        ),
        OutputFormat::Raw => println!("{}", out.path),
    }
    Ok(SUCCESS)
}

/// Frames cycle through the channels, five to a timestamp. Each seed drops
/// a pixel and a dimmer diagonal neighbour, so seeds form small blobs.
fn generate(frames: u32, seed_pixels: u32, seed: u64) -> ChannelStore {
    let mut rng = Lcg(seed);
    let channels = CHANNEL_COUNT as u32;

    (0..frames)
        .map(|n| {
            let mut frame = Frame::new((n % channels) as u8, SYNTH_START_TIME + n / channels, 0);
            for _ in 0..seed_pixels {
                let x = rng.below(255) as u8;
                let y = rng.below(255) as u8;
                let magnitude = (1 + rng.below(MAX_SEED_MAGNITUDE)) as u16;
                frame.set_pixel(PixelKey::new(x, y), magnitude.min(PAYLOAD_MAX));
                frame.set_pixel(PixelKey::new(x + 1, y + 1), (magnitude / 2).max(1));
            }
            frame
        })
        .collect()
}
