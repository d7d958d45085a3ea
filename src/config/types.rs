use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_WIDTH: u32 = 1280;
pub const DEFAULT_PRESET: &str = "ultrafast";
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
pub const DEFAULT_TEMP_MARKER: &str = "_temp";
pub const DEFAULT_INTERMEDIATE_EXTENSION: &str = "mp4";
pub const DEFAULT_MANIFEST_NAME: &str = "filelist_temp.txt";
pub const DEFAULT_OUTPUT: &str = "output.mp4";

/// 合併流程的所有固定參數
///
/// 可由 `settings.json` 覆寫任一欄位，缺少的欄位使用預設值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    pub ffmpeg_binary: PathBuf,
    /// 中間檔的畫面寬度，高度依比例縮放
    pub width: u32,
    pub preset: String,
    pub video_codec: String,
    pub audio_codec: String,
    /// 接在中間檔主檔名後的標記
    pub temp_marker: String,
    pub intermediate_extension: String,
    pub manifest_name: String,
    pub output: PathBuf,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            ffmpeg_binary: PathBuf::from("ffmpeg"),
            width: DEFAULT_WIDTH,
            preset: DEFAULT_PRESET.to_string(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            temp_marker: DEFAULT_TEMP_MARKER.to_string(),
            intermediate_extension: DEFAULT_INTERMEDIATE_EXTENSION.to_string(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl MergeSettings {
    pub fn validate(&self) -> Result<()> {
        // libx264 只接受偶數寬度
        if self.width == 0 || self.width % 2 != 0 {
            bail!("width must be a positive even number, got {}", self.width);
        }

        if self.ffmpeg_binary.as_os_str().is_empty() {
            bail!("ffmpeg_binary must not be empty");
        }

        for (field, value) in [
            ("preset", self.preset.as_str()),
            ("video_codec", self.video_codec.as_str()),
            ("audio_codec", self.audio_codec.as_str()),
            ("intermediate_extension", self.intermediate_extension.as_str()),
            ("manifest_name", self.manifest_name.as_str()),
        ] {
            if value.trim().is_empty() {
                bail!("{field} must not be empty");
            }
        }

        for (field, value) in [
            ("temp_marker", self.temp_marker.as_str()),
            ("intermediate_extension", self.intermediate_extension.as_str()),
            ("manifest_name", self.manifest_name.as_str()),
        ] {
            if value.contains(['/', '\\']) {
                bail!("{field} must not contain path separators: {value}");
            }
        }

        if self.output.file_name().is_none() {
            bail!("output must name a file: {}", self.output.display());
        }

        Ok(())
    }

    /// `scale` 濾鏡參數，`-2` 讓高度依比例並保持偶數
    #[must_use]
    pub fn scale_filter(&self) -> String {
        format!("scale={}:-2", self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = MergeSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.output, PathBuf::from("output.mp4"));
        assert_eq!(settings.manifest_name, "filelist_temp.txt");
    }

    #[test]
    fn test_scale_filter() {
        let settings = MergeSettings::default();
        assert_eq!(settings.scale_filter(), "scale=1280:-2");
    }

    #[test]
    fn test_odd_width_is_rejected() {
        let settings = MergeSettings {
            width: 1279,
            ..MergeSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = MergeSettings {
            width: 0,
            ..MergeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_marker_with_separator_is_rejected() {
        let settings = MergeSettings {
            temp_marker: "/tmp".to_string(),
            ..MergeSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("temp_marker"));
    }

    #[test]
    fn test_empty_codec_is_rejected() {
        let settings = MergeSettings {
            video_codec: "  ".to_string(),
            ..MergeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: MergeSettings =
            serde_json::from_str(r#"{ "width": 640, "preset": "veryfast" }"#).unwrap();
        assert_eq!(settings.width, 640);
        assert_eq!(settings.preset, "veryfast");
        assert_eq!(settings.video_codec, DEFAULT_VIDEO_CODEC);
        assert_eq!(settings.temp_marker, DEFAULT_TEMP_MARKER);
    }
}
