//! Main configuration files: database tuning, puma, Procfile, editor and
//! environment defaults, plus the Heroku CI manifest.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::pipeline::{Queue, StepContext};

const DATABASE_TUNING: &str = r#"  reaping_frequency: <%= ENV["DB_REAP_FREQ"] || 10 %> # https://devcenter.heroku.com/articles/concurrency-and-database-connections#bad-connections
  connect_timeout: 1 # raises PG::ConnectionBad
  checkout_timeout: 1 # raises ActiveRecord::ConnectionTimeoutError
  variables:
    statement_timeout: 10000 # manually override on a per-query basis
"#;

const PROCFILE: &str = "web: bundle exec puma -C config/puma.rb
release: bundle exec rake db:migrate
";

const DOTENV: &str = "WEB_CONCURRENCY=1 # set to 1 in dev most of the time for easy testing
SEND_EMAIL=false # change to true to send email via sendgrid
";

const GITIGNORE_EXTRA: &str = "
spec/examples.txt

.env.development.local
.env.local
.env.test.local

/.idea/
/package-lock.json
";

const EDITORCONFIG: &str = include_str!("../templates/editorconfig");
const APP_JSON: &str = include_str!("../templates/app.json");
const SCHEDULER_RAKE: &str = include_str!("../templates/scheduler.rake");

pub fn run(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    let ws = &ctx.workspace;

    ws.insert_after(
        "config/database.yml",
        Anchor::Literal("default: &default\n"),
        DATABASE_TUNING,
    )?;

    ws.uncomment_lines("config/puma.rb", Anchor::Literal("workers ENV.fetch"))?;
    ws.uncomment_lines("config/puma.rb", Anchor::Pattern("preload_app!$"))?;

    ws.create_file("Procfile", PROCFILE)?;
    ws.create_file(".editorconfig", EDITORCONFIG)?;
    ws.append_file(".gitignore", GITIGNORE_EXTRA)?;
    ws.create_file(".env", DOTENV)?;

    ctx.checkpoint("Setup config files")
}

/// Heroku CI manifest and the nightly database maintenance task.
pub fn heroku_ci(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.workspace.create_file("app.json", APP_JSON)?;
    ctx.workspace
        .create_file("lib/tasks/scheduler.rake", SCHEDULER_RAKE)?;
    Ok(())
}

/// `heroku local` fails without tmp/pids ("No such file or directory @
/// rb_sysopen - tmp/pids/server.pid").
pub fn tmp_dirs(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.workspace.empty_directory("tmp/pids")
}
