// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea CLI entrypoint.
//!
//! Loads a diagram snapshot, compiles it, and prints the program outline of
//! every window. With `--run` it also executes one window headless on the
//! in-memory surface and prints the collected annotations and log lines.

use std::error::Error;
use std::sync::Arc;

use galatea::budget::StepBudget;
use galatea::compile::compile_page;
use galatea::format::outline;
use galatea::render::MemorySurface;
use galatea::report::{NoticeLog, Severity};
use galatea::runtime::Interp;
use galatea::snapshot::diagram_from_json;

const DEFAULT_FRAMES: usize = 60;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <diagram.json> [--run <window-index>] [--frames <n>]\n\nPrints the compiled program outline of every window in the snapshot.\n\n--run executes one window headless (setup plus --frames loop iterations,\ndefault {DEFAULT_FRAMES}) on the in-memory surface, then prints collected\nannotations and debug log lines. --frames requires --run."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    snapshot_path: Option<String>,
    run: Option<usize>,
    frames: Option<usize>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--run" => {
                if options.run.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let index: usize = raw.parse().map_err(|_| ())?;
                options.run = Some(index);
            }
            "--frames" => {
                if options.frames.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let frames: usize = raw.parse().map_err(|_| ())?;
                options.frames = Some(frames);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.snapshot_path.is_some() {
                    return Err(());
                }
                options.snapshot_path = Some(arg);
            }
        }
    }

    if options.snapshot_path.is_none() {
        return Err(());
    }

    if options.frames.is_some() && options.run.is_none() {
        return Err(());
    }

    Ok(options)
}

fn print_notices(log: &NoticeLog) {
    for notice in log.notices() {
        let severity = match notice.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("{severity}: {} @ {}", notice.message, notice.at);
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "galatea".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let path = options.snapshot_path.as_deref().expect("validated by parse_options");
        let text = std::fs::read_to_string(path)?;
        let diagram = diagram_from_json(&text)?;

        let log = Arc::new(NoticeLog::new());
        let budget = StepBudget::new();
        let windows = compile_page(&diagram, log.as_ref(), &budget)?;

        if windows.is_empty() {
            println!("no windows found in {path}");
        }
        for (index, window) in windows.iter().enumerate() {
            println!("[{index}] {}", window.at);
            print!("{}", outline(window));
        }

        // Running a window clears prior markers, so compile-time notices are
        // reported before anything executes.
        print_notices(&log);

        if let Some(index) = options.run {
            let Some(window) = windows.get(index) else {
                return Err(format!(
                    "window index {index} is out of range ({} windows)",
                    windows.len()
                )
                .into());
            };

            let surface = Arc::new(MemorySurface::from_diagram(&diagram));
            let interp = Interp::new(surface, log.clone());
            let frames = options.frames.unwrap_or(DEFAULT_FRAMES);

            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            let run_result = runtime.block_on(interp.run_frames(window, &diagram, frames));

            println!("\nran window {index} for {frames} frame(s)");
            if let Err(err) = run_result {
                println!("stopped by error: {err}");
            }
            for line in log.log_lines() {
                println!("log: {line}");
            }
            print_notices(&log);
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("galatea: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values.iter().map(|v| (*v).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn rejects_empty_args() {
        parse_options(std::iter::empty()).unwrap_err();
    }

    #[test]
    fn parses_snapshot_path() {
        let options = parse_options(args(&["board.json"])).expect("parse options");
        assert_eq!(
            options,
            CliOptions { snapshot_path: Some("board.json".to_owned()), run: None, frames: None }
        );
    }

    #[test]
    fn parses_run_and_frames() {
        let options = parse_options(args(&["board.json", "--run", "0", "--frames", "10"]))
            .expect("parse options");
        assert_eq!(options.run, Some(0));
        assert_eq!(options.frames, Some(10));
    }

    #[test]
    fn rejects_frames_without_run() {
        parse_options(args(&["board.json", "--frames", "10"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_flags() {
        parse_options(args(&["board.json", "--nope"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["board.json", "--run", "0", "--run", "1"])).unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_paths() {
        parse_options(args(&["one.json", "two.json"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse_options(args(&["board.json", "--run"])).unwrap_err();
        parse_options(args(&["board.json", "--run", "zero"])).unwrap_err();
    }
}
