pub mod commands;
pub mod context;
pub mod error;
pub mod logging;
pub mod repl;

pub use context::ReplContext;
pub use error::CommandError;
pub use repl::readline;
