//! File-level mutation operations rooted at the application directory.
//!
//! Each operation reads the whole target file, applies exactly one transform
//! from [`crate::core::mutate`], and writes the result back as a full
//! overwrite. Operating on a file that does not exist is an error, except for
//! the create/append/remove primitives documented below.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::mutate::{self, Anchor};
use crate::error::KickoffError;

/// The working tree being bootstrapped. All paths are relative to its root.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        fs::read_to_string(self.path(rel)).with_context(|| format!("read {rel}"))
    }

    fn write(&self, rel: &str, contents: &str) -> Result<()> {
        if let Some(parent) = self.path(rel).parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(self.path(rel), contents).with_context(|| format!("write {rel}"))
    }

    /// Insert `text` immediately after the line containing the first match of
    /// `anchor`. A missing anchor is fatal.
    pub fn insert_after(&self, rel: &str, anchor: Anchor, text: &str) -> Result<()> {
        debug!(file = rel, anchor = anchor.as_str(), "insert after anchor");
        let content = self.read(rel)?;
        let updated = mutate::insert_after_anchor(&content, anchor, text)
            .with_context(|| format!("insert into {rel}"))?;
        self.write(rel, &updated)
    }

    /// Insert `text` immediately before the first match of `anchor`. A
    /// missing anchor is fatal.
    pub fn insert_before(&self, rel: &str, anchor: Anchor, text: &str) -> Result<()> {
        debug!(file = rel, anchor = anchor.as_str(), "insert before anchor");
        let content = self.read(rel)?;
        let updated = mutate::insert_before_anchor(&content, anchor, text)
            .with_context(|| format!("insert into {rel}"))?;
        self.write(rel, &updated)
    }

    /// Replace the first match of `pattern` with the literal `replacement`.
    /// No match leaves the file untouched.
    pub fn replace_first(&self, rel: &str, pattern: &str, replacement: &str) -> Result<()> {
        debug!(file = rel, pattern, "replace first match");
        let content = self.read(rel)?;
        let updated = mutate::replace_first(&content, pattern, replacement)
            .with_context(|| format!("substitute in {rel}"))?;
        self.write(rel, &updated)
    }

    /// Comment out every line matching `matcher` (idempotent).
    pub fn comment_lines(&self, rel: &str, matcher: Anchor) -> Result<()> {
        debug!(file = rel, matcher = matcher.as_str(), "comment lines");
        let content = self.read(rel)?;
        let updated = mutate::comment_lines(&content, matcher)
            .with_context(|| format!("comment lines in {rel}"))?;
        self.write(rel, &updated)
    }

    /// Uncomment every line matching `matcher` (idempotent).
    pub fn uncomment_lines(&self, rel: &str, matcher: Anchor) -> Result<()> {
        debug!(file = rel, matcher = matcher.as_str(), "uncomment lines");
        let content = self.read(rel)?;
        let updated = mutate::uncomment_lines(&content, matcher)
            .with_context(|| format!("uncomment lines in {rel}"))?;
        self.write(rel, &updated)
    }

    /// Create a file with `contents`. Refuses to overwrite an existing file.
    pub fn create_file(&self, rel: &str, contents: &str) -> Result<()> {
        if self.exists(rel) {
            return Err(KickoffError::FileConflict {
                path: self.path(rel),
            }
            .into());
        }
        debug!(file = rel, "create file");
        self.write(rel, contents)
    }

    /// Create or overwrite a file with `contents`.
    pub fn create_file_force(&self, rel: &str, contents: &str) -> Result<()> {
        debug!(file = rel, "create file (overwrite allowed)");
        self.write(rel, contents)
    }

    /// Append `contents`, creating the file if it does not exist.
    pub fn append_file(&self, rel: &str, contents: &str) -> Result<()> {
        debug!(file = rel, "append to file");
        let mut combined = if self.exists(rel) {
            self.read(rel)?
        } else {
            String::new()
        };
        combined.push_str(contents);
        self.write(rel, &combined)
    }

    /// Remove a file; absent files are a no-op.
    pub fn remove_file(&self, rel: &str) -> Result<()> {
        if !self.exists(rel) {
            return Ok(());
        }
        debug!(file = rel, "remove file");
        fs::remove_file(self.path(rel)).with_context(|| format!("remove {rel}"))
    }

    /// Create an (empty) directory tree.
    pub fn empty_directory(&self, rel: &str) -> Result<()> {
        debug!(dir = rel, "create directory");
        fs::create_dir_all(self.path(rel)).with_context(|| format!("create directory {rel}"))
    }

    /// Find the first file (lexicographically) under `dir` whose name ends
    /// with `suffix`, returning its workspace-relative path. Generator output
    /// carries a timestamp prefix, so steps discover it by suffix.
    pub fn find_generated(&self, dir: &str, suffix: &str) -> Result<String> {
        let dir_path = self.path(dir);
        let mut names: Vec<String> = fs::read_dir(&dir_path)
            .with_context(|| format!("read directory {dir}"))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        let name = names
            .iter()
            .find(|name| name.ends_with(suffix))
            .ok_or_else(|| anyhow!("no file matching *{suffix} under {dir}"))?;
        Ok(format!("{dir}/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestApp;

    #[test]
    fn mutating_a_missing_file_fails() {
        let app = TestApp::empty().expect("app");
        let err = app
            .workspace()
            .insert_after("nope.rb", Anchor::Literal("x"), "y\n")
            .expect_err("should fail");
        assert!(err.to_string().contains("read nope.rb"));
    }

    #[test]
    fn create_file_refuses_to_overwrite() {
        let app = TestApp::empty().expect("app");
        let ws = app.workspace();
        ws.create_file("a.txt", "one\n").expect("create");
        let err = ws.create_file("a.txt", "two\n").expect_err("conflict");
        assert!(
            err.downcast_ref::<KickoffError>()
                .is_some_and(|e| matches!(e, KickoffError::FileConflict { .. }))
        );
        assert_eq!(ws.read("a.txt").expect("read"), "one\n");
    }

    #[test]
    fn create_file_force_overwrites() {
        let app = TestApp::empty().expect("app");
        let ws = app.workspace();
        ws.create_file("a.txt", "one\n").expect("create");
        ws.create_file_force("a.txt", "two\n").expect("overwrite");
        assert_eq!(ws.read("a.txt").expect("read"), "two\n");
    }

    #[test]
    fn append_creates_then_appends() {
        let app = TestApp::empty().expect("app");
        let ws = app.workspace();
        ws.append_file("log.txt", "one\n").expect("append");
        ws.append_file("log.txt", "two\n").expect("append");
        assert_eq!(ws.read("log.txt").expect("read"), "one\ntwo\n");
    }

    #[test]
    fn remove_missing_file_is_noop() {
        let app = TestApp::empty().expect("app");
        app.workspace().remove_file("ghost.txt").expect("remove");
    }

    #[test]
    fn find_generated_picks_first_suffix_match() {
        let app = TestApp::empty().expect("app");
        let ws = app.workspace();
        ws.create_file("db/migrate/20240202_other.rb", "x\n")
            .expect("create");
        ws.create_file("db/migrate/20240101_enable_uuid_extensions.rb", "y\n")
            .expect("create");
        let found = ws
            .find_generated("db/migrate", "enable_uuid_extensions.rb")
            .expect("find");
        assert_eq!(found, "db/migrate/20240101_enable_uuid_extensions.rb");
    }

    #[test]
    fn find_generated_errors_when_nothing_matches() {
        let app = TestApp::empty().expect("app");
        let ws = app.workspace();
        ws.empty_directory("db/migrate").expect("mkdir");
        assert!(ws.find_generated("db/migrate", "missing.rb").is_err());
    }
}
