//! CLI command handlers, one per file.

mod classify;
mod completions;
mod resolve;
mod share;

pub use classify::run_classify;
pub use completions::run_completions;
pub use resolve::{run_resolve, ResolveArgs};
pub use share::run_share;
