use crate::config::MergeSettings;
use std::path::Path;
use std::process::Command;

/// 依設定組出 ffmpeg 指令
pub struct FfmpegCommand<'a> {
    settings: &'a MergeSettings,
}

impl<'a> FfmpegCommand<'a> {
    #[must_use]
    pub const fn new(settings: &'a MergeSettings) -> Self {
        Self { settings }
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.settings.ffmpeg_binary);
        cmd.args(["-hide_banner", "-nostdin", "-loglevel", "error", "-y"]);
        cmd
    }

    /// 轉成統一寬度與編碼的中間檔
    #[must_use]
    pub fn reencode(&self, source_path: &Path, destination_path: &Path) -> Command {
        let mut cmd = self.base_command();
        let scale_filter = self.settings.scale_filter();

        cmd.arg("-i").arg(source_path);
        cmd.args([
            "-preset", self.settings.preset.as_str(),
            "-vf", scale_filter.as_str(),
            "-c:v", self.settings.video_codec.as_str(),
            "-c:a", self.settings.audio_codec.as_str(),
            "-strict", "experimental",
        ]);
        cmd.arg(destination_path);

        cmd
    }

    /// 以 concat demuxer 直接複製串流合併，不重新編碼
    #[must_use]
    pub fn concat(&self, manifest_path: &Path, destination_path: &Path) -> Command {
        let mut cmd = self.base_command();

        cmd.args(["-f", "concat", "-safe", "0", "-i"]);
        cmd.arg(manifest_path);
        cmd.args(["-c:v", "copy", "-c:a", "copy"]);
        cmd.arg(destination_path);

        cmd
    }
}
