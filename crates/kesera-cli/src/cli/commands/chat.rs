//! `kesera chat` – the chat bot on stdin/stdout.

use anyhow::{Context, Result};
use kesera_core::config::KeseraConfig;
use kesera_core::dialogue::{self, ChatBot};
use kesera_core::fetcher::ResultFetcher;
use kesera_core::photo;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const CONVERSATION: &str = "console";

pub async fn run_chat(cfg: &KeseraConfig) -> Result<()> {
    let fetcher = ResultFetcher::new(cfg)?;
    let site_base = fetcher.base_url().to_string();
    let bot = ChatBot::new(Arc::new(fetcher), cfg.chat.session_ttl());
    tokio::task::spawn_blocking(move || repl(&bot, &site_base, io::stdin().lock(), io::stdout()))
        .await
        .context("chat task join")?
}

/// One message per line until EOF or `/quit`. Photos are shown as absolute links.
fn repl(bot: &ChatBot, site_base: &str, input: impl BufRead, mut out: impl Write) -> Result<()> {
    writeln!(out, "{}", dialogue::HELP)?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }
        let reply = bot.handle(CONVERSATION, &line);
        writeln!(out, "{}", reply.text.trim_end())?;
        if let Some(reference) = reply.photo {
            match photo::resolve(site_base, &reference) {
                Ok(url) => writeln!(out, "Photo: {url}")?,
                Err(e) => tracing::warn!("dropping photo reference: {:#}", e),
            }
        }
        out.flush()?;
    }
    Ok(())
}
