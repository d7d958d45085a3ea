use crate::error::{MergeError, Result};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 產生 concat demuxer 清單內容，每行 `file '<path>'`
///
/// 單引號依 ffmpeg 規則改寫為 `'\''`
pub fn render_manifest(entries: &[impl AsRef<Path>]) -> String {
    entries
        .iter()
        .map(|entry| {
            let path = entry.as_ref().to_string_lossy();
            format!("file '{}'\n", path.replace('\'', r"'\''"))
        })
        .collect()
}

/// 寫入清單並在返回前 flush 與 sync，確保 ffmpeg 讀到完整內容
pub fn write_manifest(manifest_path: &Path, entries: &[impl AsRef<Path>]) -> Result<()> {
    let to_error = |source| MergeError::Manifest {
        path: manifest_path.to_path_buf(),
        source,
    };

    let file = File::create(manifest_path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_manifest(entries).as_bytes())
        .map_err(to_error)?;
    let file = writer.into_inner().map_err(|e| to_error(e.into_error()))?;
    file.sync_all().map_err(to_error)?;

    debug!(
        "已寫入清單 {} ({} 個檔案)",
        manifest_path.display(),
        entries.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_preserves_order() {
        let manifest = render_manifest(&["a_temp.mp4", "b_temp.mp4"]);
        assert_eq!(manifest, "file 'a_temp.mp4'\nfile 'b_temp.mp4'\n");
    }

    #[test]
    fn test_render_escapes_single_quotes() {
        let manifest = render_manifest(&["it's_temp.mp4"]);
        assert_eq!(manifest, "file 'it'\\''s_temp.mp4'\n");
    }

    #[test]
    fn test_render_empty() {
        let entries: [&str; 0] = [];
        assert!(render_manifest(&entries).is_empty());
    }

    #[test]
    fn test_write_overwrites_existing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filelist_temp.txt");
        fs::write(&path, "file 'stale.mp4'\nfile 'stale2.mp4'\nfile 'stale3.mp4'\n").unwrap();

        write_manifest(&path, &["a_temp.mp4", "b_temp.mp4"]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, ["file 'a_temp.mp4'", "file 'b_temp.mp4'"]);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("filelist_temp.txt");

        let err = write_manifest(&path, &["a_temp.mp4"]).unwrap_err();
        assert!(matches!(err, MergeError::Manifest { .. }));
    }
}
