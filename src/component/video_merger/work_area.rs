//! 單次執行的暫存空間
//!
//! 中間檔與清單都放在輸出檔旁的 `.video_merger-<uuid>-XXXXXX` 目錄，
//! 同一資料夾內同時執行多個合併也不會互相覆寫。
//! 目錄由 [`TempDir`] 持有，drop 時連同內容一起刪除

use crate::error::{MergeError, Result};
use log::debug;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use uuid::Uuid;

pub const WORK_DIR_PREFIX: &str = ".video_merger-";

/// 刪除暫存檔，檔案已不存在時不視為錯誤
pub fn remove_temp_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("已刪除暫存檔: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("暫存檔已不存在: {}", path.display());
            Ok(())
        }
        Err(source) => Err(MergeError::Cleanup {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[derive(Debug)]
pub struct WorkArea {
    dir: TempDir,
    run_id: Uuid,
    reserved: HashSet<OsString>,
}

impl WorkArea {
    /// 在 `parent` 底下建立本次執行專用的目錄
    pub fn create(parent: &Path) -> Result<Self> {
        let run_id = Uuid::new_v4();
        let dir = Builder::new()
            .prefix(&format!("{WORK_DIR_PREFIX}{run_id}-"))
            .tempdir_in(parent)
            .map_err(|source| MergeError::WorkDir {
                path: parent.to_path_buf(),
                source,
            })?;
        debug!("建立暫存目錄: {}", dir.path().display());

        Ok(Self {
            dir,
            run_id,
            reserved: HashSet::new(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// 保留一個檔名，重複時在副檔名前加上 `_1`、`_2`…
    pub fn reserve(&mut self, file_name: &OsStr) -> PathBuf {
        let mut candidate = file_name.to_os_string();
        let mut counter = 0;
        while self.reserved.contains(&candidate) {
            counter += 1;
            candidate = numbered_name(file_name, counter);
        }
        self.reserved.insert(candidate.clone());
        self.dir.path().join(candidate)
    }

    /// 中間檔路徑：`<主檔名><marker>.<extension>`
    pub fn reserve_intermediate(
        &mut self,
        source_path: &Path,
        marker: &str,
        extension: &str,
    ) -> PathBuf {
        let name = intermediate_name(source_path, marker, extension);
        self.reserve(&name)
    }

    /// 刪除目錄與其中剩下的內容，失敗時回報錯誤
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|source| MergeError::Cleanup {
            path: path.clone(),
            source,
        })?;
        debug!("已刪除暫存目錄: {}", path.display());
        Ok(())
    }
}

#[must_use]
pub fn intermediate_name(source_path: &Path, marker: &str, extension: &str) -> OsString {
    let mut name = source_path
        .file_stem()
        .map_or_else(|| OsString::from("output"), OsStr::to_os_string);
    name.push(marker);
    name.push(".");
    name.push(extension);
    name
}

fn numbered_name(file_name: &OsStr, counter: usize) -> OsString {
    let path = Path::new(file_name);
    let mut name = path
        .file_stem()
        .map_or_else(OsString::new, OsStr::to_os_string);
    name.push(format!("_{counter}"));
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    name
}
