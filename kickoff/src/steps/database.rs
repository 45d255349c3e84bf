//! UUID primary-key extensions and database creation.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::pipeline::{Queue, StepContext};

const EXTENSIONS: &str = "    enable_extension \"uuid-ossp\"\n    enable_extension \"pgcrypto\"\n";

const IMPLICIT_ORDER: &str =
    "  self.implicit_order_column = 'created_at' # used in place of uuid column since it isn't numeric\n";

/// Generate a migration enabling the postgres UUID extensions and point the
/// base record class at a sortable ordering column.
pub fn uuid_extensions(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.bundle(&["exec", "rails", "generate", "migration", "enable_uuid_extensions"])?;

    // The generator prefixes the filename with a timestamp; find it by suffix.
    let migration = ctx
        .workspace
        .find_generated("db/migrate", "enable_uuid_extensions.rb")?;
    ctx.workspace
        .insert_after(&migration, Anchor::Pattern("def change\n"), EXTENSIONS)?;

    ctx.workspace.insert_after(
        "app/models/application_record.rb",
        Anchor::Literal("class ApplicationRecord < ActiveRecord::Base"),
        IMPLICIT_ORDER,
    )?;
    Ok(())
}

/// Deferred: the migrations only run once the bundle is installed.
pub fn create_database(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|ctx, _queue| {
        ctx.bundle(&["exec", "rails", "db:create", "db:migrate"])?;
        ctx.checkpoint("Create and migrate database")
    });
    Ok(())
}
