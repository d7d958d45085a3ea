//! 影片合併元件
//!
//! 使用 ffmpeg 將每個影片轉為相同寬度與編碼，再以 concat demuxer 無損串接

mod ffmpeg_command;
mod main;
mod manifest;
mod work_area;

pub use ffmpeg_command::FfmpegCommand;
pub use main::{COMPLETION_MESSAGE, MergeReport, VideoMerger};
pub use manifest::{render_manifest, write_manifest};
pub use work_area::{WORK_DIR_PREFIX, WorkArea, intermediate_name, remove_temp_file};
