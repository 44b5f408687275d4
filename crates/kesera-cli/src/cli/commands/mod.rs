//! CLI command handlers, one per file.

mod chat;
mod config;
mod fetch;
mod serve;

pub use chat::run_chat;
pub use config::run_config;
pub use fetch::{run_fetch, FetchOptions};
pub use serve::run_serve;
