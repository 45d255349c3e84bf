//! Bootstrap pipeline for freshly generated Rails applications.
//!
//! Run inside (or pointed at) an application directory right after the
//! framework generator finishes. Set `YES_ALL=1` to resolve every prompt
//! affirmatively for non-interactive runs.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kickoff::io::config::load_config;
use kickoff::io::git::Checkpointer;
use kickoff::io::process::ShellRunner;
use kickoff::io::prompt::{FixedAnswerPrompt, InteractivePrompt, PromptResolver};
use kickoff::io::render::TemplateEngine;
use kickoff::io::workspace::Workspace;
use kickoff::pipeline::{RunFlags, StepContext, run_pipeline};
use kickoff::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "kickoff",
    version,
    about = "Finish setting up a freshly generated Rails application"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full setup pipeline in an application directory.
    Run {
        /// Application directory (defaults to the current directory).
        #[arg(long, default_value = ".")]
        dir: std::path::PathBuf,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILURE);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run { dir } => cmd_run(&dir),
    }
}

fn cmd_run(dir: &Path) -> Result<()> {
    let root = dir
        .canonicalize()
        .with_context(|| format!("resolve application directory {}", dir.display()))?;
    let config = load_config(&root.join("kickoff.toml"))?;

    let accept_all = std::env::var("YES_ALL").is_ok_and(|value| value == "1");
    let prompt: Box<dyn PromptResolver> = if accept_all {
        Box::new(FixedAnswerPrompt::yes())
    } else {
        Box::new(InteractivePrompt)
    };

    let project_name = root
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("application")
        .to_string();

    let ctx = StepContext {
        workspace: Workspace::new(&root),
        config,
        flags: RunFlags::default(),
        project_name,
        templates: TemplateEngine::new(),
        prompt,
        runner: Box::new(ShellRunner),
        checkpointer: Checkpointer::disabled(),
    };
    run_pipeline(ctx)
}
