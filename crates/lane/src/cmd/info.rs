use lane_frame::{channel_name, RawInput};
use lane_lucid::LucidFile;
use serde::Serialize;

use crate::cmd::InfoArgs;
use crate::exit::{lucid_error, CliResult, SUCCESS};
use crate::output::{new_table, print_json, OutputFormat};

#[derive(Serialize)]
struct ChannelSummary {
    id: u8,
    name: &'static str,
    frames: usize,
    pixels: usize,
}

#[derive(Serialize)]
struct InfoOutput {
    path: String,
    file_id: u32,
    start_time: u32,
    compressed: bool,
    compression_mode: &'static str,
    linear_lut: bool,
    shutter_rate: u8,
    shutter_mode: u16,
    matrix_table: u16,
    active_chips: Vec<u8>,
    frames: usize,
    channels: Vec<ChannelSummary>,
}

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let file = LucidFile::open(&args.path)
        .map_err(|err| lucid_error(&format!("{}", args.path.display()), err))?;
    let header = file.header();

    let channels = file
        .frames_by_channel()
        .channels()
        .map(|(id, frames)| ChannelSummary {
            id,
            name: channel_name(id),
            frames: frames.len(),
            pixels: frames.iter().map(|f| f.len()).sum(),
        })
        .collect();

    let out = InfoOutput {
        path: args.path.display().to_string(),
        file_id: header.file_id,
        start_time: header.start_time,
        compressed: header.compressed,
        compression_mode: header.compression_mode.describe(),
        linear_lut: header.linear_lut,
        shutter_rate: header.shutter_rate,
        shutter_mode: header.shutter_mode,
        matrix_table: header.matrix_table,
        active_chips: header.active_chips().collect(),
        frames: file.frames_by_channel().frame_count(),
        channels,
    };

    print_info(&out, format);
    Ok(SUCCESS)
}

fn print_info(out: &InfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut header = new_table(vec!["FIELD", "VALUE"]);
            for (field, value) in header_rows(out) {
                header.add_row(vec![field.to_string(), value]);
            }
            println!("{header}");

            let mut channels = new_table(vec!["CHANNEL", "FRAMES", "PIXELS"]);
            for c in &out.channels {
                channels.add_row(vec![
                    format!("{} ({})", c.name, c.id),
                    c.frames.to_string(),
                    c.pixels.to_string(),
                ]);
            }
            println!("{channels}");
        }
        OutputFormat::Pretty => {
            println!("Capture {}:", out.path);
            for (field, value) in header_rows(out) {
                println!("  {:<18}{}", format!("{field}:"), value);
            }
            for c in &out.channels {
                println!(
                    "  {} ({}): {} frames, {} pixels",
                    c.name, c.id, c.frames, c.pixels
                );
            }
        }
        OutputFormat::Raw => {
            println!("{}", out.file_id);
        }
    }
}

fn header_rows(out: &InfoOutput) -> Vec<(&'static str, String)> {
    let chips = out
        .active_chips
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        ("File ID", out.file_id.to_string()),
        ("Start time", out.start_time.to_string()),
        ("Compression", out.compression_mode.to_string()),
        ("Linear LUT", out.linear_lut.to_string()),
        ("Shutter rate", out.shutter_rate.to_string()),
        ("Shutter mode", format!("{:#06x}", out.shutter_mode)),
        ("Active chips", chips),
        ("Frames", out.frames.to_string()),
    ]
}
