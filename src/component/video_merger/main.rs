use super::ffmpeg_command::FfmpegCommand;
use super::manifest::write_manifest;
use super::work_area::{WorkArea, remove_temp_file};
use crate::config::{DEFAULT_OUTPUT, MergeSettings};
use crate::error::{MergeError, Result};
use crate::tools::run_to_completion;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempPath;
use uuid::Uuid;

pub const COMPLETION_MESSAGE: &str = "Concatenation and conversion completed.";

#[derive(Debug, Clone)]
pub struct MergeReport {
    pub output: PathBuf,
    pub input_count: usize,
    pub run_id: Uuid,
}

pub struct VideoMerger {
    settings: MergeSettings,
    shutdown_signal: Arc<AtomicBool>,
}

impl VideoMerger {
    pub const fn new(settings: MergeSettings, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            settings,
            shutdown_signal,
        }
    }

    /// 依輸入順序重新編碼、寫入清單、串接並清除暫存檔
    ///
    /// 任一步驟失敗都會在返回前刪除本次產生的暫存檔，
    /// 合併結果只在成功時才會取代既有的輸出檔
    pub fn run(&self, inputs: &[PathBuf]) -> Result<MergeReport> {
        if inputs.is_empty() {
            return Err(MergeError::NoInputs);
        }
        self.check_shutdown()?;

        let output = self.settings.output.clone();
        let mut work_area = WorkArea::create(output_parent(&output))?;
        info!(
            "開始合併 {} 個影片 [{}] -> {}",
            inputs.len(),
            work_area.run_id(),
            output.display()
        );

        let manifest_path = work_area.reserve(OsStr::new(&self.settings.manifest_name));
        let merged_name = output
            .file_name()
            .unwrap_or_else(|| OsStr::new(DEFAULT_OUTPUT))
            .to_os_string();
        let merged_path = work_area.reserve(&merged_name);

        let intermediates = self.reencode_all(inputs, &mut work_area)?;
        self.check_shutdown()?;

        Self::create_manifest(&work_area, &manifest_path, &intermediates)?;
        self.check_shutdown()?;

        let merged = self.concatenate(&manifest_path, merged_path)?;
        merged
            .persist(&output)
            .map_err(|e| MergeError::Publish {
                path: output.clone(),
                source: e.error,
            })?;
        info!("已輸出合併檔案: {}", output.display());

        let run_id = work_area.run_id();
        Self::cleanup(&intermediates, &manifest_path, work_area)?;

        Ok(MergeReport {
            output,
            input_count: inputs.len(),
            run_id,
        })
    }

    fn check_shutdown(&self) -> Result<()> {
        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷信號，停止合併");
            return Err(MergeError::Interrupted);
        }
        Ok(())
    }

    fn reencode_all(
        &self,
        inputs: &[PathBuf],
        work_area: &mut WorkArea,
    ) -> Result<Vec<PathBuf>> {
        let ffmpeg = FfmpegCommand::new(&self.settings);
        let progress_bar = ProgressBar::new(inputs.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut intermediates = Vec::with_capacity(inputs.len());

        for source_path in inputs {
            let intermediate = work_area.reserve_intermediate(
                source_path,
                &self.settings.temp_marker,
                &self.settings.intermediate_extension,
            );

            progress_bar.set_message(
                source_path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
            );
            info!(
                "重新編碼: {} -> {}",
                source_path.display(),
                intermediate.display()
            );

            let outcome = run_to_completion(
                &mut ffmpeg.reencode(source_path, &intermediate),
                &self.shutdown_signal,
            )
            .inspect_err(|_| progress_bar.abandon())?;

            if !outcome.success() {
                error!(
                    "重新編碼失敗 {}: {}",
                    source_path.display(),
                    outcome.status
                );
                progress_bar.abandon();
                return Err(MergeError::ReencodeFailed {
                    input: source_path.clone(),
                    status: outcome.status,
                    stderr: outcome.stderr_tail,
                });
            }

            intermediates.push(intermediate);
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("重新編碼完成");
        Ok(intermediates)
    }

    /// 清單內使用相對於暫存目錄的路徑
    fn create_manifest(
        work_area: &WorkArea,
        manifest_path: &Path,
        intermediates: &[PathBuf],
    ) -> Result<()> {
        let entries: Vec<&Path> = intermediates
            .iter()
            .map(|path| path.strip_prefix(work_area.path()).unwrap_or(path))
            .collect();

        write_manifest(manifest_path, &entries)?;
        info!("已寫入合併清單: {}", manifest_path.display());
        Ok(())
    }

    /// 串接成功後以 [`TempPath`] 持有結果，發佈前 drop 會刪除
    fn concatenate(&self, manifest_path: &Path, merged_path: PathBuf) -> Result<TempPath> {
        info!("串接影片: {}", merged_path.display());

        let outcome = run_to_completion(
            &mut FfmpegCommand::new(&self.settings).concat(manifest_path, &merged_path),
            &self.shutdown_signal,
        )?;

        if !outcome.success() {
            error!("串接失敗: {}", outcome.status);
            return Err(MergeError::ConcatFailed {
                status: outcome.status,
                stderr: outcome.stderr_tail,
            });
        }

        Ok(TempPath::from_path(merged_path))
    }

    fn cleanup(
        intermediates: &[PathBuf],
        manifest_path: &Path,
        work_area: WorkArea,
    ) -> Result<()> {
        let count = intermediates.len();
        for intermediate in intermediates {
            remove_temp_file(intermediate)?;
        }
        remove_temp_file(manifest_path)?;
        work_area.close()?;

        info!("已清除 {count} 個中間檔與合併清單");
        Ok(())
    }
}

/// 暫存目錄建在輸出檔所在的資料夾，確保最後的 rename 不跨檔案系統
fn output_parent(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
