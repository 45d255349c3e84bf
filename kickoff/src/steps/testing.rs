//! RSpec, FactoryBot, Capybara and shoulda-matchers scaffolding.
//!
//! Everything here is deferred: the rspec generator and the files it
//! produces only exist after the install phase.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::pipeline::{Queue, StepContext};

const CHROMEDRIVER: &str = include_str!("../templates/chromedriver.rb");
const SHOULDA_MATCHERS: &str = include_str!("../templates/shoulda_matchers.rb");
const LINT_SPEC: &str = include_str!("../templates/lint_spec.rb");

const RAILS_HELPER: &str = "spec/rails_helper.rb";
const SPEC_HELPER: &str = "spec/spec_helper.rb";

pub fn run(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|ctx, _queue| {
        ctx.bundle(&["exec", "rails", "generate", "rspec:install"])?;
        ctx.bundle(&["binstubs", "rspec-core"])?;
        ctx.checkpoint("RSpec install")?;

        let ws = &ctx.workspace;
        ws.create_file("spec/support/chromedriver.rb", CHROMEDRIVER)?;
        ws.create_file("spec/support/shoulda_matchers.rb", SHOULDA_MATCHERS)?;
        ws.create_file("spec/lint_spec.rb", LINT_SPEC)?;

        // Load everything under spec/support (the generator ships this line
        // commented out).
        ws.uncomment_lines(RAILS_HELPER, Anchor::Pattern(r"Dir\[Rails\.root\.join"))?;

        // Drop the =begin/=end guard around the recommended settings.
        ws.replace_first(SPEC_HELPER, "(?m)^=begin\n", "")?;
        ws.replace_first(SPEC_HELPER, "(?m)^=end\n", "")?;

        ws.comment_lines(RAILS_HELPER, Anchor::Literal("config.fixture_path ="))?;

        ws.insert_after(
            RAILS_HELPER,
            Anchor::Literal("RSpec.configure do |config|\n"),
            "  config.include FactoryBot::Syntax::Methods\n\n",
        )?;
        ws.insert_after(
            RAILS_HELPER,
            Anchor::Literal(
                "Add additional requires below this line. Rails is not loaded until this point!\n",
            ),
            "require \"capybara/rails\"\n",
        )?;

        ctx.checkpoint("Finish setting up testing")
    });
    Ok(())
}
