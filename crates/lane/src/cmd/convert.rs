use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lane_lucid::LucidFile;
use lane_text::{LaneFile, LANE_EXTENSION};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::cmd::ConvertArgs;
use crate::exit::{
    io_error, lucid_error, text_error, CliError, CliResult, FAILURE, INTERNAL, SUCCESS,
};
use crate::output::{new_table, print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct Converted {
    input: String,
    output: String,
    frames: usize,
}

#[derive(Serialize)]
struct Skipped {
    input: String,
    output: String,
}

#[derive(Serialize)]
struct Failed {
    input: String,
    error: String,
}

#[derive(Serialize)]
struct ConvertOutput {
    converted: Vec<Converted>,
    skipped: Vec<Skipped>,
    failed: Vec<Failed>,
    interrupted: bool,
}

pub fn run(args: ConvertArgs, format: OutputFormat) -> CliResult<i32> {
    let inputs = list_captures(&args.input, &args.extension)?;
    std::fs::create_dir_all(&args.output)
        .map_err(|err| io_error(&format!("create {}", args.output.display()), err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut out = ConvertOutput {
        converted: Vec::new(),
        skipped: Vec::new(),
        failed: Vec::new(),
        interrupted: false,
    };

    for input in inputs {
        if !running.load(Ordering::SeqCst) {
            warn!("interrupted, remaining captures left unconverted");
            out.interrupted = true;
            break;
        }

        let target = lane_target(&input, &args.output);
        if target.exists() {
            info!(
                input = %input.display(),
                output = %target.display(),
                "already converted, skipping"
            );
            out.skipped.push(Skipped {
                input: input.display().to_string(),
                output: target.display().to_string(),
            });
            continue;
        }

        match convert_one(&input, &target) {
            Ok(done) => {
                info!(input = %done.input, frames = done.frames, "converted");
                out.converted.push(done);
            }
            Err(err) => {
                error!(
                    input = %input.display(),
                    code = err.code,
                    error = %err,
                    "conversion failed"
                );
                out.failed.push(Failed {
                    input: input.display().to_string(),
                    error: err.message,
                });
            }
        }
    }

    print_convert(&out, format);
    if out.failed.is_empty() && !out.interrupted {
        Ok(SUCCESS)
    } else {
        Ok(FAILURE)
    }
}

/// `<output_dir>/<stem>.lane` for a capture. Only the last extension of the
/// input is replaced.
fn lane_target(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .unwrap_or_else(|| OsStr::new("capture"))
        .to_os_string();
    name.push(".");
    name.push(LANE_EXTENSION);
    output_dir.join(name)
}

/// Decode one capture and write it to `target`.
fn convert_one(input: &Path, target: &Path) -> CliResult<Converted> {
    let capture = LucidFile::open(input).map_err(|err| lucid_error("decode", err))?;
    let lane = LaneFile::from_input(&capture);

    lane.save(target)
        .map_err(|err| text_error(&format!("write {}", target.display()), err))?;

    Ok(Converted {
        input: input.display().to_string(),
        output: target.display().to_string(),
        frames: lane.channels.frame_count(),
    })
}

/// Files directly inside `dir` with the given extension, sorted by path.
fn list_captures(dir: &Path, extension: &str) -> CliResult<Vec<PathBuf>> {
    let context = format!("read {}", dir.display());
    let entries = std::fs::read_dir(dir).map_err(|err| io_error(&context, err))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| io_error(&context, err))?.path();
        let matches = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}

fn print_convert(out: &ConvertOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["INPUT", "RESULT", "DETAIL"]);
            for c in &out.converted {
                table.add_row(vec![
                    c.input.clone(),
                    "ok".to_string(),
                    format!("{} frames -> {}", c.frames, c.output),
                ]);
            }
            for s in &out.skipped {
                table.add_row(vec![
                    s.input.clone(),
                    "skipped".to_string(),
                    format!("{} exists", s.output),
                ]);
            }
            for f in &out.failed {
                table.add_row(vec![f.input.clone(), "failed".to_string(), f.error.clone()]);
            }
            println!("{table}");
            print_summary(out);
        }
        OutputFormat::Pretty => {
            for c in &out.converted {
                println!("  [  OK] {} ({} frames)", c.input, c.frames);
            }
            for s in &out.skipped {
                println!("  [SKIP] {} (already converted)", s.input);
            }
            for f in &out.failed {
                println!("  [FAIL] {}: {}", f.input, f.error);
            }
            print_summary(out);
        }
        OutputFormat::Raw => {
            for c in &out.converted {
                println!("{}", c.output);
            }
        }
    }
}

fn print_summary(out: &ConvertOutput) {
    println!(
        "{} converted, {} skipped, {} failed{}",
        out.converted.len(),
        out.skipped.len(),
        out.failed.len(),
        if out.interrupted { ", interrupted" } else { "" }
    );
}
