//! Web adapter: HTML result pages and the chat endpoint.
//!
//! Lookups block on curl, so every handler hands them to the blocking pool;
//! one slow upstream answer never stalls other requests or conversations.

mod pages;
mod routes;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use kesera_core::dialogue::ChatBot;
use kesera_core::fetcher::FetchRequest;
use kesera_core::source::ResultSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

/// Shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn ResultSource>,
    bot: Arc<ChatBot>,
    /// Results site root, for turning relative photo references into links.
    site_base: String,
    /// Used by `/result` when the query names no student.
    defaults: Option<FetchRequest>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ResultSource>,
        site_base: String,
        session_ttl: Duration,
        defaults: Option<FetchRequest>,
    ) -> Self {
        let bot = Arc::new(ChatBot::new(Arc::clone(&source), session_ttl));
        Self {
            source,
            bot,
            site_base,
            defaults,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::get_index))
        .route("/health", get(routes::get_health))
        .route("/result", get(routes::get_result_query))
        .route(
            "/result/{registration_number}/{first_name}",
            get(routes::get_result_path),
        )
        .route("/chat/{conversation}", post(routes::post_chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C. Expired chat sessions are swept every `sweep_every`.
pub async fn serve(bind: &str, state: AppState, sweep_every: Duration) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    let addr = listener.local_addr()?;
    tracing::info!("web adapter listening on http://{addr}");
    println!("Listening on http://{addr}");

    let sweeper = spawn_sweeper(Arc::clone(&state.bot), sweep_every);
    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;
    sweeper.abort();
    served.context("web server")
}

fn spawn_sweeper(bot: Arc<ChatBot>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            bot.sessions().sweep();
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("signal received, shutting down");
}

#[cfg(test)]
mod tests;
