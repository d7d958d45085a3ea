//! 合併流程的錯誤型別

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MergeError>;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("no input files given")]
    NoInputs,

    #[error("failed to launch {program}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("lost track of {program}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("re-encoding {} failed ({status}): {stderr}", input.display())]
    ReencodeFailed {
        input: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("concatenation failed ({status}): {stderr}")]
    ConcatFailed { status: ExitStatus, stderr: String },

    #[error("cannot prepare work directory {}", path.display())]
    WorkDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write manifest {}", path.display())]
    Manifest {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot remove temporary file {}", path.display())]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot move merged file to {}", path.display())]
    Publish {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("interrupted by user")]
    Interrupted,
}
