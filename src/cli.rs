use crate::config::MergeSettings;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Re-encode videos to a common format and join them into one file
#[derive(Parser, Debug)]
#[command(name = "video_merger", version)]
pub struct Cli {
    /// Input video files, joined in the order given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output file (overwritten when present)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings file (JSON); defaults to ./settings.json when present
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Path to the ffmpeg binary
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Width of the re-encoded videos in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 預設值 < 設定檔 < 命令列參數
    pub fn resolve_settings(&self) -> Result<MergeSettings> {
        let mut settings = MergeSettings::load(self.settings.as_deref())?;
        self.apply_overrides(&mut settings);
        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut MergeSettings) {
        if let Some(output) = &self.output {
            settings.output.clone_from(output);
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            settings.ffmpeg_binary.clone_from(ffmpeg);
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
    }
}
