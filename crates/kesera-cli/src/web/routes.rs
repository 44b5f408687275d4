use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kesera_core::fetcher::FetchRequest;
use kesera_core::photo;
use kesera_core::render;
use kesera_core::source::Lookup;
use serde::Deserialize;
use std::sync::Arc;

use super::pages;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ResultParams {
    registration_number: Option<String>,
    first_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    text: String,
}

pub async fn get_index(State(state): State<AppState>) -> Response {
    pages::index(state.defaults.is_some()).into_response()
}

pub async fn get_health() -> &'static str {
    "ok"
}

/// `/result?registration_number=..&first_name=..`; both blank means the default student.
pub async fn get_result_query(
    State(state): State<AppState>,
    Query(params): Query<ResultParams>,
) -> Response {
    let reg = params.registration_number.unwrap_or_default();
    let name = params.first_name.unwrap_or_default();

    let request = if reg.trim().is_empty() && name.trim().is_empty() {
        match state.defaults.clone() {
            Some(request) => request,
            None => return bad_request("Enter a registration number and first name."),
        }
    } else {
        match FetchRequest::new(&reg, &name) {
            Ok(request) => request,
            Err(e) => return bad_request(&e.to_string()),
        }
    };
    lookup_page(state, request).await
}

pub async fn get_result_path(
    State(state): State<AppState>,
    Path((registration_number, first_name)): Path<(String, String)>,
) -> Response {
    match FetchRequest::new(&registration_number, &first_name) {
        Ok(request) => lookup_page(state, request).await,
        Err(e) => bad_request(&e.to_string()),
    }
}

/// One chat message in, one reply out. Photo references come back as absolute URLs.
pub async fn post_chat(
    State(state): State<AppState>,
    Path(conversation): Path<String>,
    Json(message): Json<ChatMessage>,
) -> Response {
    let bot = Arc::clone(&state.bot);
    match tokio::task::spawn_blocking(move || bot.handle(&conversation, &message.text)).await {
        Ok(mut reply) => {
            reply.photo = reply
                .photo
                .and_then(|p| photo::resolve(&state.site_base, &p).ok());
            Json(reply).into_response()
        }
        Err(e) => {
            tracing::error!("chat task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn lookup_page(state: AppState, request: FetchRequest) -> Response {
    let source = Arc::clone(&state.source);
    let outcome = match tokio::task::spawn_blocking(move || source.lookup(&request)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("lookup task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                pages::message(render::GENERIC_FAILURE),
            )
                .into_response();
        }
    };

    match outcome {
        Ok(Lookup::Found(record)) => {
            let photo_src = record
                .photo
                .as_deref()
                .and_then(|p| photo::resolve(&state.site_base, p).ok());
            pages::student(&record, photo_src.as_deref()).into_response()
        }
        Ok(Lookup::NoStudentData) => {
            (StatusCode::NOT_FOUND, pages::message(render::NO_STUDENT_DATA)).into_response()
        }
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            pages::message(render::failure_message(&e)),
        )
            .into_response(),
    }
}

fn bad_request(text: &str) -> Response {
    (StatusCode::BAD_REQUEST, pages::message(text)).into_response()
}
