//! Final operator checklist, printed once everything else has drained.

use anyhow::Result;

use crate::pipeline::{Queue, StepContext};

const INSTRUCTIONS: &str = "
Template Completed!

Please review the above output for issues.

To finish setup, you must prepare Heroku with at minimum the following steps
1) Configure Newrelic
2) Setup Redis (if using Sidekiq)
3) Setup Sendgrid add-in in Heroku
4) Setup lib/tasks/scheduler.rake in Heroku Scheduler to run nightly!
5) Review your README.md file for needed updates
6) Review your Gemfile for formatting
";

pub fn final_instructions(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|_ctx, _queue| {
        println!("{INSTRUCTIONS}");
        Ok(())
    });
    Ok(())
}
