use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::engine::{Score, compute_score};
use crate::http::AppState;
use crate::model::AnswerVector;
use crate::model::weights::WeightTable;
use crate::report::pdf::render_pdf;
use crate::report::{ReportDocument, build_report, report_filename};
use crate::store::{self, SubmissionStore};

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

pub(crate) fn error_json(status: StatusCode, error: &str, detail: Option<String>) -> Response {
    let body = match detail {
        Some(detail) => json!({ "error": error, "detail": detail }),
        None => json!({ "error": error }),
    };
    (status, Json(body)).into_response()
}

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}

pub(crate) async fn submit_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let score = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v.get("score").and_then(Value::as_f64))
        .filter(|s| (0.0..=100.0).contains(s))
        .and_then(Score::from_f64);
    let Some(score) = score else {
        return error_json(StatusCode::BAD_REQUEST, "Invalid score", None);
    };

    let benchmark = state.benchmarker.submit(score).await;
    info!(
        score = score.value(),
        avg_score = benchmark.avg_score,
        n = benchmark.n,
        "submission scored"
    );
    Json(benchmark).into_response()
}

pub(crate) async fn pdf_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let parsed = serde_json::from_slice::<Value>(&body).ok();
    let score = parsed
        .as_ref()
        .and_then(|v| v.get("score"))
        .and_then(Value::as_f64);
    let answers = parsed
        .as_ref()
        .and_then(|v| v.get("answers"))
        .and_then(Value::as_array);
    let (Some(score), Some(answers)) = (score, answers) else {
        return error_json(StatusCode::BAD_REQUEST, "invalid input", None);
    };

    let (answers, recomputed) = match parse_answers(answers, &state.profile.weights) {
        Ok(parsed) => parsed,
        Err(detail) => return error_json(StatusCode::BAD_REQUEST, "invalid input", Some(detail)),
    };
    let Some(score) = Score::from_f64(score) else {
        return error_json(
            StatusCode::BAD_REQUEST,
            "invalid input",
            Some("score must be finite".to_string()),
        );
    };
    if score != recomputed {
        debug!(
            supplied = score.value(),
            recomputed = recomputed.value(),
            "report score differs from answers"
        );
    }

    let doc = state.with_rng(|rng| build_report(&state.profile, score, &answers, rng));
    pdf_response(&doc)
}

// The report shows the supplied score; the recomputed one is only used for diagnostics.
fn parse_answers(values: &[Value], weights: &WeightTable) -> Result<(AnswerVector, Score), String> {
    let flags = values
        .iter()
        .map(Value::as_bool)
        .collect::<Option<Vec<bool>>>()
        .ok_or_else(|| "answers must be booleans".to_string())?;
    let recomputed = compute_score(&flags, weights).map_err(|e| e.to_string())?;
    let answers = AnswerVector::try_from(flags).map_err(|e| e.to_string())?;
    Ok((answers, recomputed))
}

pub(crate) fn pdf_response(doc: &ReportDocument) -> Response {
    match render_pdf(doc) {
        Ok(bytes) => {
            info!(score = doc.score.value(), bytes = bytes.len(), "report rendered");
            (
                [
                    (CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", report_filename(doc.score)),
                    ),
                    (CACHE_CONTROL, "no-store".to_string()),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = %err, "report rendering failed");
            error_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "pdf_failed",
                Some(err.to_string()),
            )
        }
    }
}

pub(crate) async fn admin_reset_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let provided = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !state.admin_token_matches(provided) {
        warn!("admin reset rejected");
        return error_json(StatusCode::UNAUTHORIZED, "unauthorized", None);
    }

    let Some(store) = state.benchmarker.store() else {
        return error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            "db not configured",
            None,
        );
    };

    match reset_submissions(store.as_ref()).await {
        Ok(()) => {
            info!("submissions reset");
            Json(json!({ "ok": true })).into_response()
        }
        Err(err) => {
            warn!(error = %err, "admin reset failed");
            error_json(StatusCode::INTERNAL_SERVER_ERROR, "reset failed", None)
        }
    }
}

async fn reset_submissions(store: &dyn SubmissionStore) -> store::Result<()> {
    store.ensure_schema().await?;
    store.reset().await
}
