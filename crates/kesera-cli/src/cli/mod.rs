//! CLI for the kesera student-result client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kesera_core::config;
use kesera_core::fetcher::FetchRequest;
use std::path::PathBuf;

use commands::{run_chat, run_config, run_fetch, run_serve, FetchOptions};

/// Top-level CLI for kesera.
#[derive(Debug, Parser)]
#[command(name = "kesera")]
#[command(about = "kesera: look up national exam student results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Look up one student's result and print it.
    Fetch {
        /// Student registration number.
        #[arg(env = "STUDENT_REGISTRATION_NUMBER")]
        registration_number: String,

        /// Student first name, as registered.
        #[arg(env = "STUDENT_FIRST_NAME")]
        first_name: String,

        /// Print the raw JSON response instead of the formatted result.
        #[arg(long)]
        json: bool,

        /// Write the student photo to this path.
        #[arg(long, value_name = "PATH")]
        save_photo: Option<PathBuf>,

        /// Open the student photo in the desktop image viewer.
        #[arg(long)]
        show_photo: bool,
    },

    /// Serve the web page and chat endpoint.
    Serve {
        /// Listen address (overrides `[web] bind` from config.toml).
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Registration number used by `/result` when the query leaves it out.
        #[arg(long, env = "STUDENT_REGISTRATION_NUMBER")]
        registration_number: Option<String>,

        /// First name used by `/result` when the query leaves it out.
        #[arg(long, env = "STUDENT_FIRST_NAME")]
        first_name: Option<String>,
    },

    /// Talk to the result bot on the terminal.
    Chat,

    /// Show the config file location and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                registration_number,
                first_name,
                json,
                save_photo,
                show_photo,
            } => {
                let request = FetchRequest::new(&registration_number, &first_name)?;
                let opts = FetchOptions {
                    json,
                    save_photo,
                    show_photo,
                };
                run_fetch(&cfg, request, opts).await?;
            }
            CliCommand::Serve {
                bind,
                registration_number,
                first_name,
            } => {
                let defaults = default_request(registration_number, first_name);
                run_serve(&cfg, bind, defaults).await?;
            }
            CliCommand::Chat => run_chat(&cfg).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

/// Fallback lookup for the web `/result` route, when both values are configured.
fn default_request(
    registration_number: Option<String>,
    first_name: Option<String>,
) -> Option<FetchRequest> {
    let (reg, name) = (registration_number?, first_name?);
    match FetchRequest::new(&reg, &name) {
        Ok(request) => Some(request),
        Err(e) => {
            tracing::warn!("ignoring default student: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests;
