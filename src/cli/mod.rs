//! Command-line interface module
//!
//! Builds the command tree from the registry, tokenizes argv and validates
//! invocations before anything runs.

pub mod app;
pub mod args;
pub mod help;
pub mod invocation;
pub mod registry;
pub mod validate;

pub use app::{Cli, Parsed, Run};
pub use args::GlobalArgs;
pub use help::HelpTemplates;
pub use invocation::Invocation;
pub use registry::{Action, CommandSpec};
