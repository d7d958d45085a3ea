use crate::config::types::MergeSettings;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// 工作目錄下的預設設定檔
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

impl MergeSettings {
    /// 載入設定
    ///
    /// 指定的設定檔必須存在且可解析；未指定時讀取 `settings.json`，
    /// 不存在則使用預設值，解析失敗只記錄警告
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load_from(path);
        }

        let path = Path::new(DEFAULT_SETTINGS_FILE);
        if !path.exists() {
            debug!("找不到 {}，使用預設設定", path.display());
            return Ok(Self::default());
        }

        Ok(Self::load_from(path).unwrap_or_else(|e| {
            warn!("忽略無效的設定檔: {e:#}");
            Self::default()
        }))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        debug!("已載入設定: {}", path.display());
        Ok(settings)
    }
}
