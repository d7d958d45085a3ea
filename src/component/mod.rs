//! 功能元件模組

pub mod video_merger;

pub use video_merger::{COMPLETION_MESSAGE, MergeReport, VideoMerger};
