//! Git adapter for checkpoint commits.
//!
//! The pipeline records a commit after each logical unit of work so an
//! operator can inspect or roll back individual steps. We keep a small,
//! explicit wrapper around `git` subprocess calls plus a [`Checkpointer`]
//! that turns the whole mechanism into a no-op when the operator declines
//! version control.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Initialize a repository if the workdir does not already have one.
    pub fn ensure_repo(&self) -> Result<()> {
        if self.workdir.join(".git").exists() {
            return Ok(());
        }
        debug!("initializing git repository");
        self.run_checked(&["init"])?;
        Ok(())
    }

    /// Stage all changes (respects .gitignore).
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    /// True if there is anything staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let out = self.run(&["diff", "--cached", "--name-only"])?;
        Ok(!String::from_utf8_lossy(&out.stdout).trim().is_empty())
    }

    /// Commit staged changes with a message, bypassing hooks.
    ///
    /// Hooks must be skipped: the pipeline installs a pre-commit hook of its
    /// own later on, and checkpoint commits would trigger it recursively.
    /// If there are no staged changes, this returns Ok(false) and does
    /// nothing.
    #[instrument(skip_all)]
    pub fn commit_staged(&self, message: &str) -> Result<bool> {
        if !self.has_staged_changes()? {
            debug!("no staged changes, skipping commit");
            return Ok(false);
        }
        debug!("committing staged changes");
        self.run_checked(&["commit", "-m", message, "--no-verify"])?;
        Ok(true)
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

/// Records commit checkpoints, or silently does nothing when disabled.
///
/// The enable/disable decision is made once, at the start of the run, and
/// held for the run's lifetime.
#[derive(Debug, Clone)]
pub struct Checkpointer {
    git: Option<Git>,
}

impl Checkpointer {
    pub fn enabled(git: Git) -> Self {
        Self { git: Some(git) }
    }

    pub fn disabled() -> Self {
        Self { git: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.git.is_some()
    }

    /// Stage the whole working tree and commit it with `message`.
    ///
    /// Returns whether a commit was created. Disabled mode is a pure no-op;
    /// an empty stage skips the commit rather than failing.
    pub fn checkpoint(&self, message: &str) -> Result<bool> {
        let Some(git) = &self.git else {
            return Ok(false);
        };
        debug!(message, "recording checkpoint");
        git.add_all()?;
        git.commit_staged(message)
    }
}
