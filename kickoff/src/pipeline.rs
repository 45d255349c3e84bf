//! Pipeline orchestration: preflight, decisions, the fixed step order, the
//! install phase, and the deferred drain.
//!
//! Steps are independent except through the shared working tree and the
//! deferred queue. Their order is a manually maintained contract: generator
//! configuration runs before anything invokes a generator, linting runs after
//! the files it lints exist. A failure in any step aborts the whole run; the
//! per-step commit checkpoints are the only resilience mechanism.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::core::queue::DeferredQueue;
use crate::core::version::{Requirement, Version};
use crate::error::KickoffError;
use crate::io::config::KickoffConfig;
use crate::io::git::{Checkpointer, Git};
use crate::io::process::CommandRunner;
use crate::io::prompt::PromptResolver;
use crate::io::render::TemplateEngine;
use crate::io::workspace::Workspace;
use crate::steps;

/// Decisions made once, early in the run, and read thereafter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunFlags {
    pub using_sidekiq: bool,
}

/// Shared state threaded through every pipeline step and deferred action.
pub struct StepContext {
    pub workspace: Workspace,
    pub config: KickoffConfig,
    pub flags: RunFlags,
    pub project_name: String,
    pub templates: TemplateEngine,
    pub prompt: Box<dyn PromptResolver>,
    pub runner: Box<dyn CommandRunner>,
    pub checkpointer: Checkpointer,
}

/// The queue of actions postponed until after the install phase.
pub type Queue = DeferredQueue<StepContext>;

impl StepContext {
    pub fn ask(&mut self, question: &str) -> Result<bool> {
        self.prompt.ask_yes_no(question)
    }

    /// Record a commit checkpoint (no-op when commits are disabled).
    pub fn checkpoint(&self, message: &str) -> Result<()> {
        self.checkpointer.checkpoint(message)?;
        Ok(())
    }

    /// Run an external command in the application directory.
    pub fn run_command(&self, program: &str, args: &[&str]) -> Result<()> {
        self.runner.run(self.workspace.root(), program, args)
    }

    /// Run the configured bundler command with `args`.
    pub fn bundle(&self, args: &[&str]) -> Result<()> {
        self.run_prefixed(self.config.commands.bundle.clone(), args)
    }

    /// Run the configured yarn command with `args`.
    pub fn yarn(&self, args: &[&str]) -> Result<()> {
        self.run_prefixed(self.config.commands.yarn.clone(), args)
    }

    fn run_prefixed(&self, prefix: Vec<String>, args: &[&str]) -> Result<()> {
        let (program, leading) = prefix.split_first().context("empty command prefix")?;
        let mut full: Vec<&str> = leading.iter().map(String::as_str).collect();
        full.extend_from_slice(args);
        self.runner.run(self.workspace.root(), program, &full)
    }
}

/// One named unit of the fixed pipeline.
pub struct PipelineStep {
    pub name: &'static str,
    pub run: fn(&mut StepContext, &mut Queue) -> Result<()>,
}

/// The hand-ordered step sequence. Ordering is significant and encodes real
/// dependencies; there is no automatic reordering.
pub fn step_sequence() -> Vec<PipelineStep> {
    vec![
        PipelineStep {
            name: "sidekiq",
            run: steps::sidekiq::run,
        },
        PipelineStep {
            name: "gems",
            run: steps::gems::run,
        },
        PipelineStep {
            name: "config-files",
            run: steps::config_files::run,
        },
        PipelineStep {
            name: "heroku-ci",
            run: steps::config_files::heroku_ci,
        },
        PipelineStep {
            name: "uuid-extensions",
            run: steps::database::uuid_extensions,
        },
        PipelineStep {
            name: "testing",
            run: steps::testing::run,
        },
        PipelineStep {
            name: "slim",
            run: steps::frontend::slim,
        },
        PipelineStep {
            name: "discard",
            run: steps::monitoring::discard,
        },
        PipelineStep {
            name: "oj",
            run: steps::monitoring::oj,
        },
        PipelineStep {
            name: "newrelic",
            run: steps::monitoring::newrelic,
        },
        PipelineStep {
            name: "environments",
            run: steps::environments::run,
        },
        PipelineStep {
            name: "generators-config",
            run: steps::generators::run,
        },
        PipelineStep {
            name: "readme",
            run: steps::generators::readme,
        },
        PipelineStep {
            name: "simple-form",
            run: steps::frontend::simple_form,
        },
        PipelineStep {
            name: "pghero-annotate-blazer",
            run: steps::monitoring::pghero_annotate_blazer,
        },
        PipelineStep {
            name: "commit-hooks",
            run: steps::linters::commit_hooks,
        },
        PipelineStep {
            name: "linters",
            run: steps::linters::run,
        },
        PipelineStep {
            name: "create-database",
            run: steps::database::create_database,
        },
        PipelineStep {
            name: "tmp-dirs",
            run: steps::config_files::tmp_dirs,
        },
        PipelineStep {
            name: "final-instructions",
            run: steps::finish::final_instructions,
        },
    ]
}

/// Run the whole pipeline to completion.
///
/// Phases: version preflight, the git decision, the immediate steps in
/// order, one `bundle install`, then the deferred drain.
pub fn run_pipeline(mut ctx: StepContext) -> Result<()> {
    let mut queue = Queue::new();

    check_tool_versions(&mut ctx)?;

    if ctx.ask("Do you want to add git commits (recommended)")? {
        let git = Git::new(ctx.workspace.root());
        git.ensure_repo()?;
        ctx.checkpointer = Checkpointer::enabled(git);
    }
    ctx.checkpoint("Initial commit")?;

    // The first deferred action marks the install boundary in history and
    // stops the preloader that would otherwise hold stale code.
    queue.enqueue(|ctx, _queue| {
        ctx.checkpoint("Commit after bundle")?;
        ctx.run_command("bin/spring", &["stop"])
    });

    for step in step_sequence() {
        info!(step = step.name, "running step");
        (step.run)(&mut ctx, &mut queue).with_context(|| format!("step `{}`", step.name))?;
    }

    info!("installing dependencies");
    ctx.bundle(&["install"])?;

    info!(pending = queue.len(), "draining deferred actions");
    queue.drain(&mut ctx)?;

    info!("pipeline complete");
    Ok(())
}

/// Verify the installed framework and language versions meet the configured
/// requirements, prompting to continue anyway on a mismatch.
fn check_tool_versions(ctx: &mut StepContext) -> Result<()> {
    let rails_requirement = Requirement::parse(&ctx.config.rails_requirement)?;
    let output = ctx
        .runner
        .run_capture(ctx.workspace.root(), "rails", &["--version"])
        .context("probe rails version")?;
    let rails_version = Version::extract(&output).context("parse rails version")?;
    confirm_requirement(ctx, "Rails", &rails_requirement, &rails_version)?;

    let ruby_requirement = Requirement::parse(&ctx.config.ruby_requirement)?;
    let output = ctx
        .runner
        .run_capture(ctx.workspace.root(), "ruby", &["--version"])
        .context("probe ruby version")?;
    let ruby_version = Version::extract(&output).context("parse ruby version")?;
    confirm_requirement(ctx, "Ruby", &ruby_requirement, &ruby_version)
}

fn confirm_requirement(
    ctx: &mut StepContext,
    tool: &str,
    requirement: &Requirement,
    found: &Version,
) -> Result<()> {
    if requirement.satisfied_by(found) {
        debug!(tool, version = %found, "version requirement satisfied");
        return Ok(());
    }
    let question =
        format!("This template requires {tool} {requirement}. You are using {found}. Continue anyway?");
    if ctx.ask(&question)? {
        warn!(tool, version = %found, required = %requirement, "continuing with unmet version requirement");
        Ok(())
    } else {
        Err(KickoffError::PreconditionRejected(format!(
            "{tool} {requirement} required, found {found}"
        ))
        .into())
    }
}
