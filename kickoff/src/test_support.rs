//! Test-only fixtures: a temp application directory shaped like generator
//! output, plus scripted prompt and command-runner substitutes.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};

use crate::io::process::{CommandRunner, render_command};
use crate::io::prompt::PromptResolver;
use crate::io::workspace::Workspace;

/// A temporary application directory.
pub struct TestApp {
    dir: tempfile::TempDir,
}

impl TestApp {
    /// An empty directory.
    pub fn empty() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    /// A directory seeded with the files a fresh framework generator leaves
    /// behind, shaped so every pipeline anchor is present.
    pub fn rails_shaped() -> Result<Self> {
        let app = Self::empty()?;
        let ws = app.workspace();
        for (rel, contents) in SEED_FILES {
            ws.create_file(rel, contents)
                .with_context(|| format!("seed {rel}"))?;
        }
        Ok(app)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.dir.path())
    }

    pub fn read(&self, rel: &str) -> String {
        self.workspace()
            .read(rel)
            .unwrap_or_else(|err| panic!("read {rel}: {err:#}"))
    }
}

/// Prompt resolver fed a fixed answer script; records every question asked.
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    questions: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            questions: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Shared handle to the question log (survives moving the prompt into a
    /// context).
    pub fn questions(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.questions)
    }
}

impl PromptResolver for ScriptedPrompt {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        self.questions.borrow_mut().push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer left for: {question}"))
    }
}

#[derive(Default)]
struct RecordingState {
    calls: Vec<String>,
    outputs: HashMap<String, String>,
}

/// Command runner that records invocations instead of spawning anything.
///
/// `run` always succeeds; `run_capture` returns the scripted output for the
/// exact command line and errors when none was provided. Clones share state,
/// so keep one clone around for assertions after moving another into a
/// context.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    state: Rc<RefCell<RecordingState>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(self, command_line: &str, output: &str) -> Self {
        self.state
            .borrow_mut()
            .outputs
            .insert(command_line.to_string(), output.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, _workdir: &Path, program: &str, args: &[&str]) -> Result<()> {
        self.state
            .borrow_mut()
            .calls
            .push(render_command(program, args));
        Ok(())
    }

    fn run_capture(&self, _workdir: &Path, program: &str, args: &[&str]) -> Result<String> {
        let command_line = render_command(program, args);
        let mut state = self.state.borrow_mut();
        state.calls.push(command_line.clone());
        state
            .outputs
            .get(&command_line)
            .cloned()
            .ok_or_else(|| anyhow!("no scripted output for `{command_line}`"))
    }
}

const SEED_FILES: &[(&str, &str)] = &[
    (
        "Gemfile",
        "source 'https://rubygems.org'\n\ngem 'rails', '~> 6.0.2'\ngem 'pg', '>= 0.18'\ngem 'jbuilder', '~> 2.7'\n",
    ),
    ("README.md", "# App\n\nThis README would normally document...\n"),
    (".gitignore", "/log\n/tmp\n/node_modules\n"),
    (
        "config/database.yml",
        "default: &default\n  adapter: postgresql\n  encoding: unicode\n\ndevelopment:\n  <<: *default\n",
    ),
    (
        "config/puma.rb",
        "max_threads_count = ENV.fetch(\"RAILS_MAX_THREADS\") { 5 }\nthreads max_threads_count, max_threads_count\n\n# workers ENV.fetch(\"WEB_CONCURRENCY\") { 2 }\n\n# preload_app!\n",
    ),
    ("config/routes.rb", "Rails.application.routes.draw do\nend\n"),
    (
        "config/application.rb",
        "require_relative 'boot'\n\nmodule App\n  class Application < Rails::Application\n    config.load_defaults 6.0\n  end\nend\n",
    ),
    (
        "config/environments/development.rb",
        "Rails.application.configure do\n  config.cache_classes = false\nend\n",
    ),
    (
        "config/environments/test.rb",
        "Rails.application.configure do\n  config.cache_classes = true\nend\n",
    ),
    (
        "config/environments/production.rb",
        "Rails.application.configure do\n  config.cache_classes = true\n  config.log_level = :debug\nend\n",
    ),
    (
        "config/webpacker.yml",
        "development:\n  dev_server:\n    host: localhost\n    hmr: false\n",
    ),
    (
        "app/models/application_record.rb",
        "class ApplicationRecord < ActiveRecord::Base\n  self.abstract_class = true\nend\n",
    ),
    (
        "app/controllers/application_controller.rb",
        "class ApplicationController < ActionController::Base\nend\n",
    ),
    (
        "app/javascript/packs/application.js",
        "require(\"@rails/ujs\").start()\nrequire(\"channels\")\n",
    ),
    (
        "app/config/webpack/environment.js",
        "const { environment } = require('@rails/webpacker')\n\nmodule.exports = environment\n",
    ),
    (
        "app/views/layouts/application.html.slim",
        "html\n  head\n    = stylesheet_link_tag 'application', media: 'all'\n  body\n    = yield\n",
    ),
    (
        "package.json",
        "{\n  \"name\": \"app\",\n  \"private\": true,\n  \"dependencies\": {\n    \"@rails/webpacker\": \"4.2.2\"\n  }\n}\n",
    ),
    // rspec:install output, pre-seeded because tests stub the generator.
    (
        "spec/rails_helper.rb",
        "require 'spec_helper'\nENV['RAILS_ENV'] ||= 'test'\n# Add additional requires below this line. Rails is not loaded until this point!\n\n# Dir[Rails.root.join('spec', 'support', '**', '*.rb')].sort.each { |f| require f }\n\nRSpec.configure do |config|\n  config.fixture_path = \"spec/fixtures\"\n  config.use_transactional_fixtures = true\nend\n",
    ),
    (
        "spec/spec_helper.rb",
        "RSpec.configure do |config|\n  config.expect_with :rspec do |expectations|\n  end\nend\n=begin\n  config.filter_run_when_matching :focus\n=end\n",
    ),
    // Generator output for the uuid-extensions step, found by suffix.
    (
        "db/migrate/20200114000000_enable_uuid_extensions.rb",
        "class EnableUuidExtensions < ActiveRecord::Migration[6.0]\n  def change\n  end\nend\n",
    ),
];
