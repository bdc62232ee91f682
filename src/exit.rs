// src/exit.rs
//! Standardized process exit codes for `repotree`.
//!
//! Provides a stable contract for scripts and automation.

use crate::error::RepotreeError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum RepotreeExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, config).
    Error = 1,
    /// Input could not be decoded (tree JSON, finding CSV, config TOML).
    InvalidInput = 2,
    /// Some finding rows matched no file and `--strict` was given.
    Unmatched = 3,
}

impl RepotreeExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a failed command to an exit code by its root cause.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<RepotreeError>() {
            Some(e) if e.is_invalid_input() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for RepotreeExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
