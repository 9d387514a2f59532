use std::net::SocketAddr;

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::*;
use crate::engine::Score;
use crate::model::profile::MicrocopyMode;
use crate::model::questions::{COMPLIANCE_V1_QUESTIONS, ROTATING_MICROCOPY};
use crate::report::card::escape_xml;
use crate::store::{MemoryStore, SubmissionStore};

struct RawResponse {
    status: u16,
    head: String,
    body: Vec<u8>,
}

impl RawResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.head
            .lines()
            .find(|line| line.to_ascii_lowercase().starts_with(&prefix))
            .map(|line| line[prefix.len()..].trim().to_string())
    }
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> RawResponse {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\nContent-Length: {}\r\n",
        body.len()
    );
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request head");
    stream.write_all(body).await.expect("write request body");

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read response");
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("http response must have separator");
    let head = String::from_utf8_lossy(&raw[..split]).into_owned();
    let body = raw[split + 4..].to_vec();
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    RawResponse { status, head, body }
}

async fn post_json(addr: SocketAddr, path: &str, body: &Value) -> RawResponse {
    let bytes = serde_json::to_vec(body).expect("encode body");
    send_raw(
        addr,
        "POST",
        path,
        &[("content-type", "application/json")],
        &bytes,
    )
    .await
}

async fn spawn(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let app = build_router(state);
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

fn memory_state(token: Option<&str>) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let benchmarker = Benchmarker::new(store.clone(), 30);
    let state = AppState::new(
        QuizProfile::compliance_v1(),
        benchmarker,
        token.map(str::to_string),
        Some(9),
    );
    (state, store)
}

async fn stored(store: &MemoryStore) -> i64 {
    store.benchmark(30).await.expect("benchmark").n
}

fn disabled_state() -> AppState {
    AppState::new(
        QuizProfile::compliance_v1(),
        Benchmarker::disabled(),
        Some("secret".to_string()),
        Some(9),
    )
}

#[test]
fn test_admin_token_matches_only_exact_configured_value() {
    let state = disabled_state();
    assert!(state.admin_token_matches(Some("secret")));
    assert!(!state.admin_token_matches(Some("Secret")));
    assert!(!state.admin_token_matches(None));

    let open = AppState::new(QuizProfile::compliance_v1(), Benchmarker::disabled(), None, None);
    assert!(!open.admin_token_matches(Some("")));
    assert!(!open.admin_token_matches(None));
}

#[tokio::test]
async fn test_healthz_and_pages() {
    let addr = spawn(disabled_state()).await;

    let resp = send_raw(addr, "GET", "/healthz", &[], b"").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.text(), "ok");

    let resp = send_raw(addr, "GET", "/", &[], b"").await;
    assert_eq!(resp.status, 200);
    assert!(resp.text().contains("href=\"/score\""));

    let resp = send_raw(addr, "GET", "/score", &[], b"").await;
    assert_eq!(resp.status, 200);
    let html = resp.text();
    for idx in 0..6 {
        assert!(html.contains(&format!("name=\"q{idx}\"")));
    }
    assert!(html.contains("Most organizations score between 35–55."));
}

#[tokio::test]
async fn test_submit_without_persistence_returns_zero_aggregate() {
    let addr = spawn(disabled_state()).await;
    let resp = post_json(addr, "/api/submit", &json!({"score": 45})).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json(), json!({"avgScore": 0, "n": 0}));
}

#[tokio::test]
async fn test_submit_with_store_aggregates() {
    let (state, store) = memory_state(None);
    let addr = spawn(state).await;

    let resp = post_json(addr, "/api/submit", &json!({"score": 30})).await;
    assert_eq!(resp.json(), json!({"avgScore": 30, "n": 1}));
    let resp = post_json(addr, "/api/submit", &json!({"score": 55})).await;
    assert_eq!(resp.json(), json!({"avgScore": 43, "n": 2}));
    assert_eq!(stored(&store).await, 2);
}

#[tokio::test]
async fn test_submit_rejects_bad_scores() {
    let addr = spawn(disabled_state()).await;
    for body in [
        json!({"score": "45"}),
        json!({"score": -1}),
        json!({"score": 101}),
        json!({}),
        json!([45]),
    ] {
        let resp = post_json(addr, "/api/submit", &body).await;
        assert_eq!(resp.status, 400, "body {body}");
        assert_eq!(resp.json(), json!({"error": "Invalid score"}));
    }

    let resp = send_raw(addr, "POST", "/api/submit", &[], b"not json").await;
    assert_eq!(resp.status, 400);
}

#[tokio::test]
async fn test_pdf_endpoint_returns_attachment() {
    let addr = spawn(disabled_state()).await;
    let resp = post_json(
        addr,
        "/api/pdf",
        &json!({"score": 30, "answers": [false, true, false, true, false, false]}),
    )
    .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-type").as_deref(), Some("application/pdf"));
    assert_eq!(
        resp.header("content-disposition").as_deref(),
        Some("attachment; filename=\"compliance-reality-30.pdf\"")
    );
    assert_eq!(resp.header("cache-control").as_deref(), Some("no-store"));
    assert!(resp.body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_pdf_endpoint_validates_input() {
    let addr = spawn(disabled_state()).await;

    let resp = post_json(addr, "/api/pdf", &json!({"score": "30", "answers": []})).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.json(), json!({"error": "invalid input"}));

    let resp = post_json(addr, "/api/pdf", &json!({"score": 30, "answers": "yes"})).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.json(), json!({"error": "invalid input"}));

    let resp = post_json(
        addr,
        "/api/pdf",
        &json!({"score": 30, "answers": [true, true, true, true, true]}),
    )
    .await;
    assert_eq!(resp.status, 400);
    let body = resp.json();
    assert_eq!(body["error"], "invalid input");
    assert_eq!(body["detail"], "expected 6 answers, got 5");

    let resp = post_json(
        addr,
        "/api/pdf",
        &json!({"score": 30, "answers": [true, true, true, true, true, 1]}),
    )
    .await;
    assert_eq!(resp.status, 400);
}

#[tokio::test]
async fn test_result_page_records_submission() {
    let (state, store) = memory_state(None);
    let addr = spawn(state).await;

    let form = b"q0=yes&q1=yes&q2=no&q3=no&q4=no&q5=no";
    let resp = send_raw(
        addr,
        "POST",
        "/score",
        &[("content-type", "application/x-www-form-urlencoded")],
        form,
    )
    .await;
    assert_eq!(resp.status, 200);
    let html = resp.text();
    assert!(html.contains("30 / 100"));
    assert!(html.contains("Policy-led, execution-constrained."));
    assert!(html.contains("Benchmark based on 1 anonymous submissions in the last 30 days."));
    assert!(html.contains("/report.pdf?answers=110000"));
    assert!(html.contains("/card.svg?answers=110000"));
    assert_eq!(stored(&store).await, 1);
}

#[tokio::test]
async fn test_card_and_report_downloads() {
    let addr = spawn(disabled_state()).await;

    let resp = send_raw(addr, "GET", "/card.svg?answers=111111", &[], b"").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-type").as_deref(), Some("image/svg+xml"));
    assert_eq!(
        resp.header("content-disposition").as_deref(),
        Some("attachment; filename=\"compliance-score-100.svg\"")
    );
    assert!(resp.text().contains("Audit-resilient by design."));

    let resp = send_raw(addr, "GET", "/report.pdf?answers=000001", &[], b"").await;
    assert_eq!(resp.status, 200);
    assert_eq!(
        resp.header("content-disposition").as_deref(),
        Some("attachment; filename=\"compliance-reality-25.pdf\"")
    );

    let resp = send_raw(addr, "GET", "/card.svg?answers=1111", &[], b"").await;
    assert_eq!(resp.status, 400);
    let resp = send_raw(addr, "GET", "/report.pdf", &[], b"").await;
    assert_eq!(resp.status, 400);
}

#[tokio::test]
async fn test_admin_reset_flow() {
    let (state, store) = memory_state(Some("secret"));
    store.record(Score::clamped(70)).await.unwrap();
    let addr = spawn(state).await;

    let resp = send_raw(addr, "POST", "/api/admin-reset", &[], b"").await;
    assert_eq!(resp.status, 401);
    assert_eq!(resp.json(), json!({"error": "unauthorized"}));

    let resp = send_raw(
        addr,
        "POST",
        "/api/admin-reset",
        &[("x-admin-token", "wrong")],
        b"",
    )
    .await;
    assert_eq!(resp.status, 401);
    assert_eq!(stored(&store).await, 1);

    let resp = send_raw(
        addr,
        "POST",
        "/api/admin-reset",
        &[("x-admin-token", "secret")],
        b"",
    )
    .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json(), json!({"ok": true}));
    assert_eq!(stored(&store).await, 0);
}

#[tokio::test]
async fn test_admin_reset_without_store() {
    let addr = spawn(disabled_state()).await;
    let resp = send_raw(
        addr,
        "POST",
        "/api/admin-reset",
        &[("x-admin-token", "secret")],
        b"",
    )
    .await;
    assert_eq!(resp.status, 500);
    assert_eq!(resp.json(), json!({"error": "db not configured"}));
}

#[tokio::test]
async fn test_admin_reset_without_configured_token() {
    let (state, _store) = memory_state(None);
    let addr = spawn(state).await;
    let resp = send_raw(
        addr,
        "POST",
        "/api/admin-reset",
        &[("x-admin-token", "")],
        b"",
    )
    .await;
    assert_eq!(resp.status, 401);
}

#[test]
fn test_form_answers_default_to_no() {
    let mut form = std::collections::HashMap::new();
    form.insert("q1".to_string(), "yes".to_string());
    form.insert("q5".to_string(), "YES".to_string());
    form.insert("q2".to_string(), "maybe".to_string());
    let answers = pages::answers_from_form(&form);
    assert_eq!(answers.to_bits(), "010001");
}

#[test]
fn test_quiz_questions_match_profile() {
    let state = disabled_state();
    assert_eq!(state.profile.questions, COMPLIANCE_V1_QUESTIONS);
}

fn rotating_state() -> AppState {
    AppState::new(
        QuizProfile::compliance_v1().with_microcopy(MicrocopyMode::Rotating),
        Benchmarker::disabled(),
        None,
        Some(21),
    )
}

#[tokio::test]
async fn test_share_card_repeats_result_page_microcopy() {
    let addr = spawn(rotating_state()).await;

    let form = b"q0=yes&q1=yes&q2=no&q3=no&q4=no&q5=no";
    let resp = send_raw(
        addr,
        "POST",
        "/score",
        &[("content-type", "application/x-www-form-urlencoded")],
        form,
    )
    .await;
    let html = resp.text();
    let idx = ROTATING_MICROCOPY
        .iter()
        .position(|m| html.contains(&escape_xml(m)))
        .expect("result page shows a pool line");
    assert!(html.contains(&format!("/card.svg?answers=110000&amp;copy={idx}")));
    assert!(html.contains(&format!("/report.pdf?answers=110000&amp;copy={idx}")));

    for _ in 0..8 {
        let path = format!("/card.svg?answers=110000&copy={idx}");
        let card = send_raw(addr, "GET", &path, &[], b"").await;
        assert_eq!(card.status, 200);
        assert!(card.text().contains(&escape_xml(ROTATING_MICROCOPY[idx])));
    }
}

#[tokio::test]
async fn test_share_card_ignores_out_of_range_copy() {
    let addr = spawn(rotating_state()).await;
    let resp = send_raw(addr, "GET", "/card.svg?answers=111111&copy=99", &[], b"").await;
    assert_eq!(resp.status, 200);
    let svg = resp.text();
    assert!(
        ROTATING_MICROCOPY
            .iter()
            .any(|m| svg.contains(&escape_xml(m)))
    );
}
