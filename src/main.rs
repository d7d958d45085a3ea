use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use video_merger::cli::Cli;
use video_merger::component::{COMPLETION_MESSAGE, MergeReport, VideoMerger};
use video_merger::error::MergeError;
use video_merger::init;
use video_merger::signal::setup_shutdown_signal;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init::init(cli.verbose);

    if cli.files.is_empty() {
        eprintln!("{} {}", style("Error:").red().bold(), MergeError::NoInputs);
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(report) => {
            println!("{}", style(COMPLETION_MESSAGE).green().bold());
            info!(
                "合併完成 [{}]: {} 個影片 -> {}",
                report.run_id,
                report.input_count,
                report.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("合併失敗: {e:#}");
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<MergeReport> {
    let settings = cli.resolve_settings()?;
    let shutdown_signal: Arc<AtomicBool> = setup_shutdown_signal()?;

    let merger = VideoMerger::new(settings, shutdown_signal);
    Ok(merger.run(&cli.files)?)
}
