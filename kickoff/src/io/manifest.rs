//! Gemfile dependency declarations.
//!
//! Declarations are appended textually: plain `gem` lines at the end of the
//! Gemfile, grouped declarations as `group ... do` blocks keyed by deployment
//! environment. The bundler itself resolves and installs them later, during
//! the install phase.

use anyhow::Result;

use super::workspace::Workspace;

const GEMFILE: &str = "Gemfile";

/// A single gem declaration.
#[derive(Debug, Clone)]
pub struct Gem<'a> {
    name: &'a str,
    requirement: Option<&'a str>,
    comment: Option<&'a str>,
}

impl<'a> Gem<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            requirement: None,
            comment: None,
        }
    }

    pub fn version(mut self, requirement: &'a str) -> Self {
        self.requirement = Some(requirement);
        self
    }

    pub fn comment(mut self, comment: &'a str) -> Self {
        self.comment = Some(comment);
        self
    }

    fn render(&self, indent: &str) -> String {
        let mut line = format!("{indent}gem '{}'", self.name);
        if let Some(requirement) = self.requirement {
            line.push_str(&format!(", '{requirement}'"));
        }
        if let Some(comment) = self.comment {
            line.push_str(&format!(" # {comment}"));
        }
        line.push('\n');
        line
    }
}

/// Append plain gem declarations to the Gemfile, as one block.
pub fn add_gems(ws: &Workspace, gems: &[Gem<'_>]) -> Result<()> {
    let mut block = String::from("\n");
    for gem in gems {
        block.push_str(&gem.render(""));
    }
    ws.append_file(GEMFILE, &block)
}

/// Append a `group :env, ... do` block of declarations to the Gemfile.
pub fn add_group(ws: &Workspace, envs: &[&str], gems: &[Gem<'_>]) -> Result<()> {
    let labels: Vec<String> = envs.iter().map(|env| format!(":{env}")).collect();
    let mut block = format!("\ngroup {} do\n", labels.join(", "));
    for gem in gems {
        block.push_str(&gem.render("  "));
    }
    block.push_str("end\n");
    ws.append_file(GEMFILE, &block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestApp;

    #[test]
    fn renders_plain_versioned_and_commented_gems() {
        let app = TestApp::empty().expect("app");
        let ws = app.workspace();
        ws.create_file(GEMFILE, "source 'https://rubygems.org'\n")
            .expect("seed");
        add_gems(
            &ws,
            &[
                Gem::new("oj").comment("fast json"),
                Gem::new("discard").version("~> 1.0"),
                Gem::new("goldiloader"),
            ],
        )
        .expect("add");
        let gemfile = ws.read(GEMFILE).expect("read");
        assert_eq!(
            gemfile,
            "source 'https://rubygems.org'\n\ngem 'oj' # fast json\ngem 'discard', '~> 1.0'\ngem 'goldiloader'\n"
        );
    }

    #[test]
    fn renders_group_blocks() {
        let app = TestApp::empty().expect("app");
        let ws = app.workspace();
        ws.create_file(GEMFILE, "").expect("seed");
        add_group(
            &ws,
            &["development", "test"],
            &[Gem::new("rspec-rails"), Gem::new("dotenv-rails")],
        )
        .expect("add");
        let gemfile = ws.read(GEMFILE).expect("read");
        assert_eq!(
            gemfile,
            "\ngroup :development, :test do\n  gem 'rspec-rails'\n  gem 'dotenv-rails'\nend\n"
        );
    }
}
