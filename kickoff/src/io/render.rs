//! Rendering of embedded file payloads that need per-project values.
//!
//! Most generated files are static `include_str!` assets created verbatim by
//! their steps; the two below take the project name (and the sidekiq
//! decision) and go through minijinja.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

const README_TEMPLATE: &str = include_str!("../templates/README.md.j2");
const NEWRELIC_TEMPLATE: &str = include_str!("../templates/newrelic.yml.j2");

/// Template engine wrapper around minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("readme", README_TEMPLATE)
            .expect("readme template should be valid");
        env.add_template("newrelic", NEWRELIC_TEMPLATE)
            .expect("newrelic template should be valid");
        Self { env }
    }

    pub fn render_readme(&self, project_name: &str, using_sidekiq: bool) -> Result<String> {
        let template = self.env.get_template("readme").context("readme template")?;
        template
            .render(context! {
                project_name => project_name,
                using_sidekiq => using_sidekiq,
            })
            .context("render readme")
    }

    pub fn render_newrelic(&self, project_name: &str) -> Result<String> {
        let template = self
            .env
            .get_template("newrelic")
            .context("newrelic template")?;
        template
            .render(context! {
                project_name => project_name,
            })
            .context("render newrelic config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readme_includes_sidekiq_section_only_when_enabled() {
        let engine = TemplateEngine::new();
        let with = engine.render_readme("shop", true).expect("render");
        let without = engine.render_readme("shop", false).expect("render");
        assert!(with.contains("# shop"));
        assert!(with.contains("Sidekiq"));
        assert!(!without.contains("Sidekiq"));
    }

    #[test]
    fn newrelic_config_carries_the_project_name() {
        let engine = TemplateEngine::new();
        let rendered = engine.render_newrelic("shop").expect("render");
        assert!(rendered.contains("app_name: shop"));
        assert!(rendered.contains("app_name: shop (Development)"));
        assert!(rendered.contains("license_key:"));
    }
}
