//! Optional Sidekiq background-job setup.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::io::manifest::{self, Gem};
use crate::pipeline::{Queue, StepContext};

const PROCFILE_WORKER: &str =
    "worker: RAILS_MAX_THREADS=${SIDEKIQ_CONCURRENCY:-25} bundle exec sidekiq -t 25 -q default -q mailers\n";

const ROUTES_MOUNT: &str = "    require \"sidekiq/web\"\n    mount Sidekiq::Web => \"/sidekiq\"\n\n";

/// Ask once, record the decision for later steps (the README depends on it),
/// and defer the wiring until the gem is installed.
pub fn run(ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    ctx.flags.using_sidekiq = ctx.ask("Do you want to setup Sidekiq?")?;
    if !ctx.flags.using_sidekiq {
        return Ok(());
    }

    manifest::add_gems(&ctx.workspace, &[Gem::new("sidekiq")])?;

    queue.enqueue(|ctx, _queue| {
        ctx.workspace.insert_after(
            "config/application.rb",
            Anchor::Literal("class Application < Rails::Application\n"),
            "    config.active_job.queue_adapter = :sidekiq\n\n",
        )?;
        ctx.workspace.append_file("Procfile", PROCFILE_WORKER)?;
        ctx.workspace.insert_after(
            "config/routes.rb",
            Anchor::Literal("Rails.application.routes.draw do\n"),
            ROUTES_MOUNT,
        )?;
        ctx.checkpoint("Setup Sidekiq")
    });
    Ok(())
}
