//! Common utilities for integration tests

#[macro_use]
pub mod cli;

// Re-export commonly used items
#[allow(unused_imports)]
pub use cli::{CommandResult, DebounceCommand};
