//! Generator defaults and the project README.

use anyhow::Result;

use crate::pipeline::{Queue, StepContext};

const GENERATORS: &str = include_str!("../templates/generators.rb");

/// Configure generators before anything invokes one: UUID primary keys,
/// trimmed rspec output, factories instead of fixtures.
pub fn run(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.workspace
        .create_file("config/initializers/generators.rb", GENERATORS)?;
    ctx.checkpoint("Configured generators (UUIDs, less files)")
}

/// Replace the generated README with the project one.
pub fn readme(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    let rendered = ctx
        .templates
        .render_readme(&ctx.project_name, ctx.flags.using_sidekiq)?;
    ctx.workspace.remove_file("README.md")?;
    ctx.workspace.create_file("README.md", &rendered)?;
    ctx.checkpoint("Add README")
}
