//! Gem declarations beyond what the framework generator emits.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::io::manifest::{self, Gem};
use crate::pipeline::{Queue, StepContext};

pub fn run(ctx: &mut StepContext, _queue: &mut Queue) -> Result<()> {
    let ws = &ctx.workspace;

    // jb replaces jbuilder wholesale.
    ws.comment_lines("Gemfile", Anchor::Literal("jbuilder"))?;

    manifest::add_gems(
        ws,
        &[
            Gem::new("slim-rails"),
            Gem::new("simple_form"),
            Gem::new("jb").comment("jbuilder alternative https://github.com/amatsuda/jb"),
            Gem::new("discard")
                .version("~> 1.0")
                .comment("the newer faster version of paranoia - soft delete"),
            Gem::new("oj").comment("fast json - see oj.rb in initializers"),
            Gem::new("goldiloader"),
            Gem::new("enum_help").comment("only needed if you're using rails views & enums"),
        ],
    )?;

    manifest::add_gems(
        ws,
        &[
            Gem::new("blazer").comment("https://github.com/ankane/blazer"),
            Gem::new("pghero")
                .comment("https://github.com/ankane/pghero/blob/master/guides/Rails.md"),
            Gem::new("sendgrid-actionmailer").comment("email"),
        ],
    )?;

    manifest::add_group(ws, &["production"], &[Gem::new("rack-timeout")])?;

    manifest::add_group(
        ws,
        &["development", "test"],
        &[
            Gem::new("rspec-rails"),
            Gem::new("factory_bot_rails"),
            Gem::new("dotenv-rails"),
        ],
    )?;

    manifest::add_group(
        ws,
        &["development"],
        &[
            Gem::new("bullet"),
            Gem::new("brakeman").comment("static security scanner"),
            Gem::new("bundler-audit").comment("security issues"),
            Gem::new("bundler-leak").comment("memory issues"),
            Gem::new("annotate"),
        ],
    )?;

    manifest::add_group(
        ws,
        &["test"],
        &[
            Gem::new("capybara"),
            Gem::new("capybara-selenium"),
            Gem::new("shoulda-matchers"),
        ],
    )?;

    ctx.checkpoint("Add custom gems")
}
