//! Side-effecting adapters: filesystem mutation, git, child processes,
//! prompts, configuration, and payload rendering.

pub mod config;
pub mod git;
pub mod manifest;
pub mod process;
pub mod prompt;
pub mod render;
pub mod workspace;
