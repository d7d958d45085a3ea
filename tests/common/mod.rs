//! 測試共用的假 ffmpeg
//!
//! 重新編碼時把輸入檔複製到輸出；串接時依清單順序把中間檔接起來。
//! 串接時會在輸出資料夾留下 `concat_listing.txt`（暫存目錄內容）與
//! `manifest_copy.txt`（清單內容），資料夾內有 `fail_concat` 檔案時以其內容為結束碼失敗。
//! 檔名以 `fail` 開頭的輸入會在重新編碼時失敗

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

const FAKE_FFMPEG: &str = r#"#!/bin/sh
mode=reencode
input=""
prev=""
out=""
for arg in "$@"; do
    if [ "$prev" = "-f" ] && [ "$arg" = "concat" ]; then mode=concat; fi
    if [ "$prev" = "-i" ]; then input="$arg"; fi
    prev="$arg"
    out="$arg"
done
case "$(basename "$input")" in
    fail*) echo "simulated failure for $input" >&2; exit 1 ;;
esac
if [ "$mode" = concat ]; then
    dir=$(dirname "$input")
    ls "$dir" > "$dir/../concat_listing.txt"
    cp "$input" "$dir/../manifest_copy.txt"
    if [ -f "$dir/../fail_concat" ]; then
        echo "simulated concat failure" >&2
        exit "$(cat "$dir/../fail_concat")"
    fi
    : > "$out"
    while IFS= read -r line; do
        name=$(printf '%s\n' "$line" | sed "s/^file '\(.*\)'\$/\1/")
        cat "$dir/$name" >> "$out" || exit 1
    done < "$input"
else
    cp "$input" "$out" || exit 1
fi
"#;

/// 每個測試程序只寫一次，避免執行剛寫入的檔案時遇到 ETXTBSY
pub fn fake_ffmpeg() -> &'static Path {
    static SCRIPT: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_dir, path) = SCRIPT.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ffmpeg");
        fs::write(&path, FAKE_FFMPEG).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        (dir, path)
    });
    path
}

/// 讓 `dir` 內的下一次串接以 `exit_code` 失敗
pub fn fail_concat_in(dir: &Path, exit_code: i32) {
    fs::write(dir.join("fail_concat"), exit_code.to_string()).unwrap();
}
