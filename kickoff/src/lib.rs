//! Bootstrap pipeline for freshly generated Rails applications.
//!
//! This crate finishes the setup a framework generator leaves undone: extra
//! gem declarations, configuration patches, initializers, CI and linter
//! files, with a git commit checkpoint after each logical unit of work. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (text mutation, the deferred
//!   work-list, version comparison). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, git, child
//!   processes, prompts). Isolated behind trait seams to enable scripted
//!   substitutes in tests.
//!
//! [`pipeline`] coordinates core logic with I/O: a fixed, hand-ordered step
//! sequence ([`steps`]) runs immediate mutations, a single install phase
//! follows, and actions that depend on installed dependencies drain from the
//! deferred queue at the end.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod steps;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
