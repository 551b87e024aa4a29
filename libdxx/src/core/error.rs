//! error types for dxx codec and move synthesis

use std::path::PathBuf;

use thiserror::Error;

use crate::spatial::Ear;

/// everything the codec and renderer can fail with
#[derive(Error, Debug)]
pub enum DxxError {
    /// extension or format name is not one of DSA/DFA/DDA/DSB/DFB/DDB
    #[error("unknown data type: {0:?}")]
    UnknownFormat(String),

    /// a text line did not parse as the format's element type
    #[error("malformed sample on line {line}: {value:?}")]
    MalformedSample {
        /// 1-based line number
        line: usize,
        /// offending line content
        value: String,
    },

    /// underlying stream or file failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// no transfer function stored for a required angle
    #[error("missing transfer function for angle {angle} ({ear}): {}", path.display())]
    MissingTransferFunction {
        angle: u32,
        ear: Ear,
        path: PathBuf,
    },

    /// caller supplied a value outside the accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// the source sound ends before the move does
    #[error("sound too short: need {required} samples, have {available}")]
    SoundTooShort { required: usize, available: usize },

    /// transfer functions within one render disagree in length
    #[error("transfer function for angle {angle} has {found} samples, expected {expected}")]
    TransferFunctionMismatch {
        angle: u32,
        expected: usize,
        found: usize,
    },

    /// render options file is not valid json
    #[error("invalid render options: {0}")]
    Config(#[from] serde_json::Error),
}

/// result type for dxx stuff
pub type DxxResult<T> = Result<T, DxxError>;
