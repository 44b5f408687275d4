use super::*;
use crate::test_support::CannedSource;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

const SITE: &str = "https://sw.ministry.et";

fn state(defaults: Option<FetchRequest>) -> (AppState, Arc<CannedSource>) {
    let source = Arc::new(CannedSource::default());
    let state = AppState::new(
        source.clone(),
        SITE.to_string(),
        Duration::from_secs(60),
        defaults,
    );
    (state, source)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let res = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn chat(app: Router, conversation: &str, text: &str) -> serde_json::Value {
    let body = serde_json::json!({ "text": text }).to_string();
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/chat/{conversation}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let (state, _) = state(None);
    assert_eq!(get(router(state), "/health").await, (StatusCode::OK, "ok".to_string()));
}

#[tokio::test]
async fn index_has_form() {
    let (state, _) = state(None);
    let (status, html) = get(router(state), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"action="/result""#));
    assert!(html.contains(r#"name="first_name""#));
}

#[tokio::test]
async fn result_path_renders_escaped_record() {
    let (state, source) = state(None);
    let (status, html) = get(router(state), "/result/123456/Abebe%20Kebede").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td>Abebe Kebede</td>"));
    assert!(html.contains("Addis Ketema &lt;Secondary&gt;"));
    assert!(html.contains("<td>N/A</td>"), "absent fields use the sentinel");
    assert!(html.contains("<li>Mathematics</li><li>Physics</li>"));
    assert!(html.contains(r#"src="https://sw.ministry.et/photos/123456.jpg""#));
    assert_eq!(
        source.seen.lock().unwrap()[0],
        FetchRequest::new("123456", "Abebe Kebede").unwrap()
    );
}

#[tokio::test]
async fn result_query_uses_parameters() {
    let (state, _) = state(None);
    let (status, html) = get(
        router(state),
        "/result?registration_number=123456&first_name=Almaz",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td>Almaz</td>"));
}

#[tokio::test]
async fn result_query_falls_back_to_default_student() {
    let defaults = FetchRequest::new("123456", "Abebe").unwrap();
    let (state, source) = state(Some(defaults.clone()));
    let (status, _) = get(router(state), "/result?registration_number=&first_name=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(source.seen.lock().unwrap()[0], defaults);
}

#[tokio::test]
async fn result_query_without_input_or_defaults_is_bad_request() {
    let (state, source) = state(None);
    let (status, _) = get(router(state.clone()), "/result").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, html) = get(router(state), "/result?registration_number=123456").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("first name must not be empty"));
    assert!(source.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_student_is_not_found_with_calm_message() {
    let (state, _) = state(None);
    let (status, html) = get(router(state), "/result/999/Abebe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains(kesera_core::render::NO_STUDENT_DATA));
}

#[tokio::test]
async fn upstream_error_hides_raw_body() {
    let (state, _) = state(None);
    let (status, html) = get(router(state), "/result/403/Abebe").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains(kesera_core::render::GENERIC_FAILURE));
    assert!(!html.contains("Forbidden by upstream"));
}

#[tokio::test]
async fn chat_endpoint_keeps_per_conversation_state() {
    let (state, source) = state(None);
    let app = router(state);

    let reply = chat(app.clone(), "alice", "123456").await;
    assert_eq!(reply["text"], kesera_core::dialogue::PROMPT_FIRST_NAME);
    let reply = chat(app.clone(), "bob", "/result 777 Kebede").await;
    assert_eq!(reply["text"], kesera_core::render::NO_STUDENT_DATA);
    assert!(reply["photo"].is_null());

    let reply = chat(app, "alice", "Abebe").await;
    assert!(reply["text"].as_str().unwrap().contains("Name: Abebe"));
    assert_eq!(reply["photo"], "https://sw.ministry.et/photos/123456.jpg");

    let seen = source.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], FetchRequest::new("123456", "Abebe").unwrap());
}

#[tokio::test]
async fn script_photo_reference_is_dropped() {
    let (state, _) = state(None);
    let app = router(state);

    let (status, html) = get(app.clone(), "/result/666/Abebe").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<td>Abebe</td>"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("javascript:"));

    let reply = chat(app, "carol", "/result 666 Abebe").await;
    assert!(reply["text"].as_str().unwrap().contains("Name: Abebe"));
    assert!(reply["photo"].is_null());
}
