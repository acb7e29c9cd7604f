//! API integration tests — real `reqwest` client against a local axum mock of
//! the Fathom API.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fathom_mcp::api::{ApiTransport, FathomClient, API_KEY_HEADER};
use fathom_mcp::tools::{ToolExecutor, ToolResult, LIST_MEETINGS, LIST_TEAMS, GET_SUMMARY};
use fathom_mcp::types::{ApiConfig, OutputConfig};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const API_KEY: &str = "test-key";
const NEXT_CURSOR: &str = "eyJwYWdlIjoyfQ==/+&";

type Recorded = Arc<Mutex<Vec<Vec<(String, String)>>>>;

#[derive(Clone, Default)]
struct MockState {
    meetings_queries: Recorded,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == API_KEY)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Invalid API key"})),
    )
        .into_response()
}

fn meeting(i: usize) -> Value {
    json!({
        "title": format!("Customer call {i}"),
        "recording_id": 1000 + i,
        "url": format!("https://fathom.video/calls/{}", 1000 + i),
        "created_at": "2026-02-03T16:00:00Z",
        "recording_start_time": "2026-02-03T16:00:00Z",
        "recording_end_time": "2026-02-03T16:45:00Z",
        "calendar_invitees_domains_type": "one_or_more_external",
        "calendar_invitees": [],
        "recorded_by": {"name": "Ada", "email": "ada@acme.com", "team": "Sales"},
        "default_summary": {"markdown_formatted": "Discussed pricing. ".repeat(60)}
    })
}

async fn meetings(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let has_cursor = pairs.iter().any(|(k, _)| k == "cursor");
    state.meetings_queries.lock().unwrap().push(pairs);

    if has_cursor {
        Json(json!({"items": [meeting(99)], "next_cursor": null, "limit": 40})).into_response()
    } else {
        let items: Vec<Value> = (0..40).map(meeting).collect();
        Json(json!({"items": items, "next_cursor": NEXT_CURSOR, "limit": 40})).into_response()
    }
}

async fn teams(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/plain")],
        "upstream exploded",
    )
        .into_response()
}

async fn summary(headers: HeaderMap, Path(recording_id): Path<u64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "summary": {
            "template_name": "General",
            "markdown_formatted": format!("## Recording {recording_id}\n- Next steps agreed")
        }
    }))
    .into_response()
}

async fn start_mock() -> (SocketAddr, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/external/v1/meetings", get(meetings))
        .route("/external/v1/teams", get(teams))
        .route("/external/v1/recordings/{recording_id}/summary", get(summary))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

fn api_config(addr: SocketAddr, key: &str) -> ApiConfig {
    ApiConfig {
        base_url: format!("http://{addr}/external/v1"),
        request_timeout: Duration::from_secs(5),
        api_key: Some(SecretString::from(key)),
    }
}

fn executor(addr: SocketAddr, key: &str) -> ToolExecutor {
    let client = FathomClient::new(&api_config(addr, key)).unwrap();
    let output = OutputConfig {
        display_utc_offset_minutes: Some(0),
        ..OutputConfig::default()
    };
    ToolExecutor::new(Arc::new(client), &output).unwrap()
}

fn parse(result: &ToolResult) -> Value {
    assert!(!result.is_error, "unexpected error: {}", result.text);
    serde_json::from_str(&result.text).unwrap()
}

#[tokio::test]
async fn test_query_pairs_reach_the_api() {
    let (addr, state) = start_mock().await;
    let executor = executor(addr, API_KEY);

    executor
        .call(
            LIST_MEETINGS,
            json!({
                "teams": ["Sales", "Customer Success"],
                "include_summary": true,
                "include_transcript": false,
                "calendar_invitees_domains_type": "all",
                "created_after": "2026-01-01T00:00:00Z"
            }),
        )
        .await;

    let queries = state.meetings_queries.lock().unwrap().clone();
    assert_eq!(
        queries,
        vec![vec![
            ("created_after".to_string(), "2026-01-01T00:00:00Z".to_string()),
            ("include_summary".to_string(), "true".to_string()),
            ("teams[]".to_string(), "Sales".to_string()),
            ("teams[]".to_string(), "Customer Success".to_string()),
        ]]
    );
}

#[tokio::test]
async fn test_oversized_page_truncated_and_cursor_round_trips() {
    let (addr, state) = start_mock().await;
    let executor = executor(addr, API_KEY);

    let first = executor
        .call(
            LIST_MEETINGS,
            json!({"include_summary": true, "response_format": "json"}),
        )
        .await;
    let first = parse(&first);
    assert_eq!(first["meetings"].as_array().unwrap().len(), 20);
    assert_eq!(first["count"], json!(20));
    assert_eq!(first["truncated"], json!(true));
    assert_eq!(first["meetings"][0]["duration_minutes"], json!(45));
    let cursor = first["next_cursor"].as_str().unwrap().to_string();
    assert_eq!(cursor, NEXT_CURSOR);

    let second = executor
        .call(
            LIST_MEETINGS,
            json!({"cursor": cursor, "response_format": "json"}),
        )
        .await;
    let second = parse(&second);
    assert_eq!(second["count"], json!(1));
    assert_eq!(second["has_more"], json!(false));
    assert!(second.get("truncated").is_none());

    let queries = state.meetings_queries.lock().unwrap().clone();
    assert_eq!(
        queries[1],
        vec![("cursor".to_string(), NEXT_CURSOR.to_string())]
    );
}

#[tokio::test]
async fn test_markdown_truncation_clips_to_budget() {
    let (addr, _state) = start_mock().await;
    let result = executor(addr, API_KEY)
        .call(LIST_MEETINGS, json!({"include_summary": true}))
        .await;

    assert!(!result.is_error);
    assert!(result.text.starts_with("**Note:** Response truncated"));
    assert_eq!(result.text.chars().count(), 25_000 - 100);
    assert!(result.text.contains("- **Meeting duration:** 45 min"));
}

#[tokio::test]
async fn test_same_call_same_text() {
    let (addr, _state) = start_mock().await;
    let executor = executor(addr, API_KEY);
    let args = json!({"include_summary": true});
    let a = executor.call(LIST_MEETINGS, args.clone()).await;
    let b = executor.call(LIST_MEETINGS, args).await;
    assert_eq!(a.text, b.text);
}

#[tokio::test]
async fn test_bad_key_reports_json_detail() {
    let (addr, _state) = start_mock().await;
    let result = executor(addr, "wrong-key")
        .call(LIST_MEETINGS, json!({}))
        .await;
    assert!(result.is_error);
    assert_eq!(
        result.text,
        "Error: Fathom API error: 401 GET (/meetings): Invalid API key"
    );
}

#[tokio::test]
async fn test_plain_text_error_detail() {
    let (addr, _state) = start_mock().await;
    let result = executor(addr, API_KEY).call(LIST_TEAMS, json!({})).await;
    assert!(result.is_error);
    assert_eq!(
        result.text,
        "Error: Fathom API error: 502 GET (/teams): upstream exploded"
    );
}

#[tokio::test]
async fn test_summary_by_recording_id() {
    let (addr, _state) = start_mock().await;
    let result = executor(addr, API_KEY)
        .call(GET_SUMMARY, json!({"recording_id": 314}))
        .await;
    assert!(!result.is_error, "{}", result.text);
    assert!(result.text.starts_with("# Meeting Summary (recording 314)\n*Template: General*"));
    assert!(result.text.contains("## Recording 314"));
}

#[tokio::test]
async fn test_unreachable_host_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = FathomClient::new(&api_config(addr, API_KEY)).unwrap();
    let err = client
        .get("/teams", &Default::default())
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(err
        .to_string()
        .starts_with("Fathom API request failed: GET (/teams)"));
}
