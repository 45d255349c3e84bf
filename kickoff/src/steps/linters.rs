//! Linter configuration, package.json scripts, and the husky pre-commit
//! hook. All deferred: the packages come from yarn, and the lint pass runs
//! against files earlier deferred actions produce.

use anyhow::Result;

use crate::core::mutate::Anchor;
use crate::pipeline::{Queue, StepContext};

const ESLINTRC: &str = include_str!("../templates/eslintrc.yml");
const RUBOCOP: &str = include_str!("../templates/rubocop.yml");
const STYLELINTRC: &str = include_str!("../templates/stylelintrc.json");

// Inserted just above the dependencies table in package.json.
const PACKAGE_JSON_DEPENDENCIES: Anchor<'static> = Anchor::Literal("\n  \"dependencies\": {");

const PACKAGE_SCRIPTS: &str = r#"    "scripts": {
      "lint": "eslint \"app/**/*.{tsx,js,jsx}\" --fix",
      "lint:style": "stylelint \"app/**/*.less\" \"app/**/*.css\" \"app/**/*.scss\" \"app/**/*.sass\" --fix",
      "lint:ruby": "rubocop -a",
      "lint:ci": "npm-run-all -p lint lint:style",
      "test": "jest",
      "test:watch": "yarn test -- --watch",
      "test:ruby": "rails test",
      "validate": "npm-run-all -p -c lint lint:style lint:ruby",
      "validate:all": "npm-run-all -p lint lint:style lint:ruby test test:ruby",
      "test:suite": "npm-run-all -p test:ruby",
      "build:prod": "RAILS_ENV=production rails assets:precompile",
      "build:prod-profile": "PROFILE=true RAILS_ENV=production rails assets:precompile",
      "build:prod-prep": "RAILS_ENV=production rails assets:clobber"
    },
"#;

const HUSKY_HOOKS: &str = r#"
  "husky": {
    "hooks": {
      "pre-commit": "yarn validate"
    }
  },
"#;

const ESLINT_PACKAGES: &[&str] = &[
    "eslint",
    "stylelint",
    "@typescript-eslint/eslint-plugin",
    "eslint-import-resolver-webpack",
    "@typescript-eslint/parser",
    "babel-eslint",
    "eslint-config-airbnb",
    "eslint-plugin-import",
    "eslint-plugin-jest",
    "eslint-plugin-jsx-a11y",
    "eslint-plugin-react",
    "eslint-plugin-react-hooks",
    "stylelint-config-standard",
];

pub fn commit_hooks(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|ctx, _queue| {
        ctx.workspace
            .insert_before("package.json", PACKAGE_JSON_DEPENDENCIES, HUSKY_HOOKS)?;
        ctx.yarn(&["add", "--dev", "husky", "npm-run-all"])?;
        ctx.checkpoint("Install Husky")
    });
    Ok(())
}

pub fn run(_ctx: &mut StepContext, queue: &mut Queue) -> Result<()> {
    queue.enqueue(|ctx, _queue| {
        let ws = &ctx.workspace;
        ws.create_file(".eslintrc.yml", ESLINTRC)?;
        ws.create_file(".rubocop.yml", RUBOCOP)?;
        ws.create_file(".stylelintrc", STYLELINTRC)?;

        ws.insert_before("package.json", PACKAGE_JSON_DEPENDENCIES, PACKAGE_SCRIPTS)?;

        // https://www.npmjs.com/package/eslint-config-react-app
        ctx.yarn(&["add", "typescript"])?;
        let mut dev_packages = vec!["add", "--dev"];
        dev_packages.extend_from_slice(ESLINT_PACKAGES);
        ctx.yarn(&dev_packages)?;

        ctx.checkpoint("Setup styleguide and linters")?;

        ctx.workspace
            .replace_first("config/webpacker.yml", "localhost", "0.0.0.0")?;
        ctx.workspace
            .replace_first("config/webpacker.yml", "hmr: false", "hmr: true")?;
        ctx.checkpoint("cleanup webpacker.yml")?;

        ctx.workspace.replace_first(
            "app/javascript/packs/application.js",
            r#"require\("channels"\)"#,
            r#"// require("channels")"#,
        )?;

        ctx.yarn(&["validate"])?;
        ctx.checkpoint("automatically format code with linters")
    });
    Ok(())
}
