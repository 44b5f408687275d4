pub mod config;
pub mod logging;

pub mod dialogue;
pub mod fetcher;
pub mod photo;
pub mod record;
pub mod render;
pub mod source;
