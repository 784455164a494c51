// rtui: terminal browser for Redis keyspaces.
//
// Layering: rtui-store fetches, rtui-engine groups keys and renders
// values, and this crate owns arguments, config, logging and the
// terminal. Handlers are synchronous and drive store futures on a
// current-thread runtime held by the handler context.

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
