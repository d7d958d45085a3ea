pub mod load;
pub mod types;

pub use load::DEFAULT_SETTINGS_FILE;
pub use types::{
    DEFAULT_AUDIO_CODEC, DEFAULT_MANIFEST_NAME, DEFAULT_OUTPUT, DEFAULT_PRESET, DEFAULT_TEMP_MARKER,
    DEFAULT_VIDEO_CODEC, DEFAULT_WIDTH, MergeSettings,
};
