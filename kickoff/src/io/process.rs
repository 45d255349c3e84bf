//! External command invocation.
//!
//! Every collaborator (bundler, yarn, the framework generators, spring) is a
//! synchronous child process. There is no timeout: a hung tool hangs the run,
//! by contract. A non-zero exit is fatal and surfaces as
//! [`KickoffError::CommandFailed`].
//!
//! The [`CommandRunner`] trait decouples the pipeline from actual process
//! spawning; tests substitute a recording implementation so a full pipeline
//! run needs no Ruby toolchain.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::error::KickoffError;

/// Abstraction over shelling out to external tools.
pub trait CommandRunner {
    /// Run `program` with `args` in `workdir`, streaming output to the
    /// operator's terminal. Errors on spawn failure or non-zero exit.
    fn run(&self, workdir: &Path, program: &str, args: &[&str]) -> Result<()>;

    /// Run `program` with `args` in `workdir` and capture stdout (used for
    /// version probes). Errors on spawn failure or non-zero exit.
    fn run_capture(&self, workdir: &Path, program: &str, args: &[&str]) -> Result<String>;
}

/// The real thing: spawns child processes and waits for them.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, workdir: &Path, program: &str, args: &[&str]) -> Result<()> {
        let command_line = render_command(program, args);
        info!(command = %command_line, "running command");
        let status = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("spawn {command_line}"))?;
        if !status.success() {
            return Err(KickoffError::CommandFailed {
                command: command_line,
                status: status.to_string(),
                stderr: String::new(),
            }
            .into());
        }
        debug!(command = %command_line, "command finished");
        Ok(())
    }

    fn run_capture(&self, workdir: &Path, program: &str, args: &[&str]) -> Result<String> {
        let command_line = render_command(program, args);
        debug!(command = %command_line, "running command (captured)");
        let output = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawn {command_line}"))?;
        if !output.status.success() {
            return Err(KickoffError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

pub(crate) fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}
