//! Pure, deterministic logic: text transformations, the deferred work-list,
//! and version comparisons. No I/O lives here.

pub mod mutate;
pub mod queue;
pub mod version;
