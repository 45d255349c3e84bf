//! View layer setup: Slim templates and Simple Form (optionally bootstrap).

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::pipeline::{Queue, StepContext};

const APPLICATION_SCSS: &str = "  // ~ to tell webpack that this is not a relative import:
  @import '~bootstrap/dist/css/bootstrap';
";

const SCSS_PACK_IMPORT: &str = "    import '../stylesheets/application.scss'\n";

const RESOLVE_URL_LOADER: &str = "// resolve-url-loader must be used before sass-loader
environment.loaders.get('sass').use.splice(-1, 0, {
  loader: 'resolve-url-loader',
});
";

/// Deferred: convert the generated erb views to slim once html2slim can see
/// them all.
pub fn slim(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|ctx, _queue| {
        ctx.run_command("gem", &["install", "html2slim", "--no-document"])?;
        ctx.run_command("erb2slim", &["app/views/", "-d"])?;
        ctx.run_command("gem", &["uninstall", "html2slim", "-x"])?;
        ctx.checkpoint("Use Slim")
    });
    Ok(())
}

/// Deferred: the simple_form generator needs the installed gem; the
/// bootstrap decision is prompted at drain time.
pub fn simple_form(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|ctx, _queue| {
        if ctx.ask("Configure Simpleform to use bootstrap?")? {
            ctx.bundle(&["exec", "rails", "generate", "simple_form:install", "--bootstrap"])?;
            ctx.yarn(&["add", "bootstrap", "--save"])?;
            ctx.workspace
                .create_file("app/javascript/stylesheets/application.scss", APPLICATION_SCSS)?;
            ctx.workspace
                .append_file("app/javascript/packs/application.js", SCSS_PACK_IMPORT)?;
            ctx.workspace.replace_first(
                "app/views/layouts/application.html.slim",
                "stylesheet_link_tag",
                "stylesheet_pack_tag",
            )?;
        } else {
            ctx.bundle(&["exec", "rails", "generate", "simple_form:install"])?;
        }

        ctx.yarn(&["add", "resolve-url-loader", "--save"])?;
        ctx.workspace.insert_before(
            "app/config/webpack/environment.js",
            Anchor::Pattern("module.exports"),
            RESOLVE_URL_LOADER,
        )?;

        ctx.checkpoint("Initialized simpleform")
    });
    Ok(())
}
