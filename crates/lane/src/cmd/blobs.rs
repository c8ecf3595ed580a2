use lane_blob::{BlobConfig, BlobStats};
use lane_frame::{channel_name, Frame, RawInput};
use lane_lucid::LucidFile;
use serde::Serialize;
use tracing::debug;

use crate::cmd::BlobsArgs;
use crate::exit::{lucid_error, CliResult, SUCCESS};
use crate::output::{new_table, print_json, OutputFormat};

#[derive(Serialize)]
struct BlobSummary {
    size: usize,
    volume: u64,
    height: u16,
    x_min: u8,
    x_max: u8,
    y_min: u8,
    y_max: u8,
    width: u16,
    depth: u16,
    centroid_x: f64,
    centroid_y: f64,
    touches_edge: bool,
    hitting_area: u32,
}

impl From<BlobStats> for BlobSummary {
    fn from(stats: BlobStats) -> Self {
        Self {
            size: stats.size,
            volume: stats.volume,
            height: stats.height,
            x_min: stats.x_min,
            x_max: stats.x_max,
            y_min: stats.y_min,
            y_max: stats.y_max,
            width: stats.width(),
            depth: stats.depth(),
            centroid_x: round2(stats.centroid.0),
            centroid_y: round2(stats.centroid.1),
            touches_edge: stats.touches_edge(),
            hitting_area: stats.hitting_area(),
        }
    }
}

#[derive(Serialize)]
struct FrameBlobs {
    channel: u8,
    channel_name: &'static str,
    timestamp: u32,
    timestamp_sub: u8,
    pixels: usize,
    blobs: Vec<BlobSummary>,
}

#[derive(Serialize)]
struct BlobsOutput {
    path: String,
    threshold: u16,
    total_blobs: usize,
    frames: Vec<FrameBlobs>,
}

pub fn run(args: BlobsArgs, format: OutputFormat) -> CliResult<i32> {
    let file = LucidFile::open(&args.path)
        .map_err(|err| lucid_error(&args.path.display().to_string(), err))?;
    let config = BlobConfig::with_threshold(args.threshold);

    let frames: Vec<FrameBlobs> = file
        .frames_by_channel()
        .iter_frames()
        .filter(|frame| args.channel.map_or(true, |c| frame.channel() == c))
        .map(|frame| summarize(frame, &config))
        .collect();

    let out = BlobsOutput {
        path: args.path.display().to_string(),
        threshold: config.threshold,
        total_blobs: frames.iter().map(|f| f.blobs.len()).sum(),
        frames,
    };
    debug!(
        frames = out.frames.len(),
        blobs = out.total_blobs,
        "blob report ready"
    );

    print_blobs(&out, format);
    Ok(SUCCESS)
}

fn summarize(frame: &Frame, config: &BlobConfig) -> FrameBlobs {
    FrameBlobs {
        channel: frame.channel(),
        channel_name: channel_name(frame.channel()),
        timestamp: frame.timestamp(),
        timestamp_sub: frame.timestamp_sub(),
        pixels: frame.len(),
        blobs: config
            .find(frame)
            .iter()
            .map(|blob| blob.stats(frame).into())
            .collect(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn print_blobs(out: &BlobsOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = new_table(vec![
                "CHANNEL", "TIMESTAMP", "BLOB", "SIZE", "VOLUME", "HEIGHT", "EXTENT", "BOUNDS",
                "EDGE",
            ]);
            for frame in &out.frames {
                for (i, blob) in frame.blobs.iter().enumerate() {
                    table.add_row(vec![
                        frame.channel_name.to_string(),
                        format!("{}.{}", frame.timestamp, frame.timestamp_sub),
                        i.to_string(),
                        blob.size.to_string(),
                        blob.volume.to_string(),
                        blob.height.to_string(),
                        format!("{}x{}", blob.width, blob.depth),
                        format!(
                            "x {}-{}, y {}-{}",
                            blob.x_min, blob.x_max, blob.y_min, blob.y_max
                        ),
                        if blob.touches_edge { "yes" } else { "no" }.to_string(),
                    ]);
                }
            }
            println!("{table}");
            println!(
                "{} blobs in {} frames (threshold {})",
                out.total_blobs,
                out.frames.len(),
                out.threshold
            );
        }
        OutputFormat::Pretty => {
            for frame in &out.frames {
                println!(
                    "{} @ {}.{}: {} pixels, {} blobs",
                    frame.channel_name,
                    frame.timestamp,
                    frame.timestamp_sub,
                    frame.pixels,
                    frame.blobs.len()
                );
                for blob in &frame.blobs {
                    println!(
                        "  size={} volume={} height={} extent={}x{} centroid=({:.2}, {:.2}){}",
                        blob.size,
                        blob.volume,
                        blob.height,
                        blob.width,
                        blob.depth,
                        blob.centroid_x,
                        blob.centroid_y,
                        if blob.touches_edge { " edge" } else { "" }
                    );
                }
            }
        }
        OutputFormat::Raw => {
            println!("{}", out.total_blobs);
        }
    }
}

#[cfg(test)]
mod tests {
    use lane_frame::PixelKey;

    use super::*;

    #[test]
    fn summary_carries_bounding_extent() {
        let mut frame = Frame::new(1, 100, 0);
        for (x, y, v) in [(10, 20, 5), (11, 21, 7), (12, 21, 3)] {
            frame.set_pixel(PixelKey::new(x, y), v);
        }

        let report = summarize(&frame, &BlobConfig::default());
        assert_eq!(report.channel_name, "TPX1");
        assert_eq!(report.blobs.len(), 1);
        let blob = &report.blobs[0];
        assert_eq!((blob.width, blob.depth), (3, 2));
        assert_eq!(blob.volume, 15);
        assert!(!blob.touches_edge);
        assert_eq!(blob.hitting_area, 252 * 253);
    }
}
