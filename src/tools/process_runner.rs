use crate::error::{MergeError, Result};
use log::{debug, warn};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 保留 stderr 最後幾行作為錯誤訊息
const STDERR_TAIL_LINES: usize = 20;

#[derive(Debug)]
pub struct ProcessOutcome {
    pub status: ExitStatus,
    pub stderr_tail: String,
}

impl ProcessOutcome {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// 執行外部程式直到結束
///
/// stderr 由背景執行緒持續讀取，避免管線塞滿卡住子程序。
/// 收到中斷信號時終止子程序並回傳 [`MergeError::Interrupted`]
pub fn run_to_completion(
    command: &mut Command,
    shutdown_signal: &AtomicBool,
) -> Result<ProcessOutcome> {
    let program = command.get_program().to_string_lossy().into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    debug!("執行: {command:?}");

    let mut child = command.spawn().map_err(|source| MergeError::SpawnFailed {
        program: program.clone(),
        source,
    })?;
    let pid = child.id();

    let stderr_reader = child
        .stderr
        .take()
        .map(|stderr| thread::spawn(move || tail_lines(stderr, STDERR_TAIL_LINES)));

    let status = loop {
        if shutdown_signal.load(Ordering::SeqCst) {
            warn!("終止程序 [{pid}]");
            let _ = child.kill();
            let _ = child.wait();
            if let Some(reader) = stderr_reader {
                let _ = reader.join();
            }
            return Err(MergeError::Interrupted);
        }

        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                warn!("無法檢查程序狀態 [{pid}]: {source}");
                let _ = child.kill();
                let _ = child.wait();
                return Err(MergeError::Wait { program, source });
            }
        }
    };

    let stderr_tail = stderr_reader
        .map(|reader| reader.join().unwrap_or_default())
        .unwrap_or_default();

    debug!("程序結束 [{pid}]: {status}");
    Ok(ProcessOutcome {
        status,
        stderr_tail,
    })
}

/// ffmpeg 會把原始檔名寫進 stderr，不一定是 UTF-8，
/// 以 lossy 解碼並讀到 EOF，中途停止會讓子程序寫入時收到 SIGPIPE
fn tail_lines<R: Read>(reader: R, limit: usize) -> String {
    let mut reader = BufReader::new(reader);
    let mut tail = VecDeque::with_capacity(limit);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("讀取 stderr 失敗: {e}");
                break;
            }
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        if tail.len() == limit {
            tail.pop_front();
        }
        tail.push_back(line.to_string());
    }
    tail.into_iter().collect::<Vec<_>>().join("\n")
}
