//! Stable exit codes for the kickoff CLI.

/// Pipeline ran to completion.
pub const OK: i32 = 0;
/// Any failure, including a rejected version-precondition prompt.
pub const FAILURE: i32 = 1;
