//! Monitoring and data hygiene: soft-delete timestamps, Oj, New Relic,
//! PgHero, annotate and Blazer.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::pipeline::{Queue, StepContext};

const TIMESTAMP_CHANGES: &str = include_str!("../templates/timestamp_changes.rb");
const OJ_INITIALIZER: &str = include_str!("../templates/oj.rb");

const NEW_RELIC_USER_INFO: &str = r#"      before_action :new_relic_user_info

      private

      def new_relic_user_info
        return unless current_user # just capturing info for logged in users right now

        ::NewRelic::Agent.add_custom_attributes(
          user_id: current_user.id,
          user_email: current_user.email
        )
      end
"#;

const ENGINE_MOUNTS: &str =
    "    mount PgHero::Engine, at: \"pghero\"\n    mount Blazer::Engine, at: \"blazer\"\n\n";

/// Initializer forcing `t.timestamps` to be non-null and adding the
/// `discarded_at` column discard relies on.
pub fn discard(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.workspace
        .create_file("config/initializers/timestamp_changes.rb", TIMESTAMP_CHANGES)
}

pub fn oj(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.workspace
        .create_file("config/initializers/oj.rb", OJ_INITIALIZER)
}

pub fn newrelic(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.workspace.insert_after(
        "app/controllers/application_controller.rb",
        Anchor::Literal("class ApplicationController < ActionController::Base"),
        NEW_RELIC_USER_INFO,
    )?;

    let rendered = ctx.templates.render_newrelic(&ctx.project_name)?;
    ctx.workspace.create_file("config/newrelic.yml", &rendered)?;

    ctx.checkpoint("Setup Newrelic")
}

/// Deferred: these generators belong to gems that are only installed during
/// the install phase.
pub fn pghero_annotate_blazer(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|ctx, _queue| {
        ctx.bundle(&["exec", "rails", "generate", "pghero:query_stats"])?;
        ctx.bundle(&["exec", "rails", "generate", "pghero:space_stats"])?;
        ctx.bundle(&["exec", "rails", "g", "annotate:install"])?;
        ctx.bundle(&["exec", "rails", "generate", "blazer:install"])?;

        ctx.workspace.insert_after(
            "config/routes.rb",
            Anchor::Literal("Rails.application.routes.draw do\n"),
            ENGINE_MOUNTS,
        )
    });
    Ok(())
}
