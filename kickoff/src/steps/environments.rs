//! Per-environment configuration: bullet, mail delivery, console access,
//! production log level, strict parameter handling.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::pipeline::{Queue, StepContext};

const DEVELOPMENT: &str = "config/environments/development.rb";

// The environment files close with a bare `end`; insertions land just above it.
const END_OF_BLOCK: Anchor<'static> = Anchor::Pattern("(?m)^end\n");

const BULLET: &str = r#"  config.after_initialize do
    # https://github.com/flyerhzm/bullet#configuration
    Bullet.enable = true
    Bullet.rails_logger = true
  end
"#;

const SENDGRID: &str = r#"  if ENV['SEND_EMAIL'] && ENV['SEND_EMAIL'] == 'true'
    config.action_mailer.delivery_method = :sendgrid_actionmailer
    config.action_mailer.sendgrid_actionmailer_settings = {
      api_key: ENV['SENDGRID_API_KEY'],
      raise_delivery_errors: true
    }
    config.action_mailer.perform_deliveries = true
  else
    config.action_mailer.perform_deliveries = false
  end
"#;

const CONSOLE_PERMISSIONS: &str = r#"  # whitelist testing domain
  config.hosts << 'app.test'

  config.web_console.permissions = '0.0.0.0/0'
"#;

const UNPERMITTED_PARAMETERS: &str =
    "\n  config.action_controller.action_on_unpermitted_parameters = :raise\n";

pub fn run(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    ctx.workspace.insert_before(DEVELOPMENT, END_OF_BLOCK, BULLET)?;
    ctx.checkpoint("Configure Bullet in development & console permissions")?;

    ctx.workspace.insert_before(DEVELOPMENT, END_OF_BLOCK, SENDGRID)?;
    ctx.checkpoint("Sendgrid email setup")?;

    ctx.workspace
        .insert_before(DEVELOPMENT, END_OF_BLOCK, CONSOLE_PERMISSIONS)?;
    ctx.checkpoint("Whitelist console permissions")?;

    ctx.workspace.replace_first(
        "config/environments/production.rb",
        r"config\.log_level = :debug",
        r#"config.log_level = ENV.fetch("LOG_LEVEL", "info").to_sym"#,
    )?;
    ctx.checkpoint("Make :info the default log_level in production")?;

    for env in ["development", "test"] {
        ctx.workspace.insert_before(
            &format!("config/environments/{env}.rb"),
            END_OF_BLOCK,
            UNPERMITTED_PARAMETERS,
        )?;
    }
    ctx.checkpoint("Raise an error when unpermitted parameters in development")
}
