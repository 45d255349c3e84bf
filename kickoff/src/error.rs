//! Typed failures the pipeline can hit.
//!
//! Orchestration code propagates these through `anyhow`; the variants exist so
//! callers (and tests) can downcast to the exact failure class. Every one of
//! them is fatal at the point of origin; the only mitigation is the commit
//! checkpoints already recorded for completed steps.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KickoffError {
    /// A required insertion point is missing from a target file. Usually means
    /// the installed framework generator produces different content than the
    /// version this tool was written against.
    #[error("anchor `{pattern}` not found")]
    AnchorNotFound { pattern: String },

    /// Refusing to clobber an existing file without an explicit overwrite.
    #[error("file already exists: {}", path.display())]
    FileConflict { path: PathBuf },

    /// A shelled-out command exited non-zero (or could not report a status).
    #[error("command `{command}` failed ({status}){}", fmt_stderr(stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The operator declined to continue past an unmet tool-version
    /// requirement.
    #[error("{0}")]
    PreconditionRejected(String),

    /// An anchor or substitution pattern failed to compile.
    #[error("invalid pattern: {0}")]
    BadPattern(#[from] regex::Error),
}

fn fmt_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
