//! `kesera serve` – web page and chat endpoint.

use anyhow::Result;
use kesera_core::config::KeseraConfig;
use kesera_core::fetcher::{FetchRequest, ResultFetcher};
use std::sync::Arc;

use crate::web::{self, AppState};

pub async fn run_serve(
    cfg: &KeseraConfig,
    bind: Option<String>,
    defaults: Option<FetchRequest>,
) -> Result<()> {
    let fetcher = ResultFetcher::new(cfg)?;
    let site_base = fetcher.base_url().to_string();
    let state = AppState::new(Arc::new(fetcher), site_base, cfg.chat.session_ttl(), defaults);
    let bind = bind.unwrap_or_else(|| cfg.web.bind.clone());
    web::serve(&bind, state, cfg.chat.sweep_interval()).await
}
