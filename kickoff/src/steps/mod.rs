//! The named pipeline steps.
//!
//! Each function takes the shared [`StepContext`] plus the deferred queue,
//! performs immediate mutations and external commands, and enqueues whatever
//! only makes sense after the install phase. Step bodies carry the template
//! content; the mechanics live in [`crate::core`] and [`crate::io`].
//!
//! [`StepContext`]: crate::pipeline::StepContext

pub mod config_files;
pub mod database;
pub mod environments;
pub mod finish;
pub mod frontend;
pub mod gems;
pub mod generators;
pub mod linters;
pub mod monitoring;
pub mod sidekiq;
pub mod testing;
