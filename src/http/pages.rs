use std::collections::HashMap;

use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

use crate::engine::{
    ScoreSummary, microcopy_for, microcopy_index, pinned_microcopy, score_answers, summarize,
};
use crate::http::AppState;
use crate::http::handlers::{error_json, pdf_response};
use crate::model::{ANSWER_COUNT, AnswerVector};
use crate::report::build_report;
use crate::report::card::{CARD_FOOTER, CARD_KICKER, card_filename, escape_xml, render_card_svg};
use crate::store::Benchmark;

const STYLE: &str = r#"
:root { --bg: #0b0f14; --card: #111821; --text: #f3f4f6; --muted: #9ca3af; }
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg); color: var(--text); font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; }
.container { max-width: 760px; margin: 0 auto; padding: 48px 20px; }
.stack > * + * { margin-top: 16px; }
.card { background: var(--card); border: 1px solid rgba(255,255,255,0.08); border-radius: 18px; padding: 28px; }
.card.tight { padding: 18px 20px; }
.kicker { font-size: 12px; letter-spacing: 0.12em; text-transform: uppercase; color: var(--muted); }
.h1 { font-size: 44px; line-height: 1.08; margin: 12px 0; }
.sub { color: var(--muted); font-size: 18px; line-height: 1.5; }
.row { display: flex; gap: 12px; align-items: center; flex-wrap: wrap; }
.btn { border-radius: 999px; padding: 12px 20px; border: 1px solid rgba(255,255,255,0.2); background: transparent; color: var(--text); font-weight: 700; cursor: pointer; text-decoration: none; }
.btnPrimary { background: #f9fafb; color: #0b0f14; }
.pill { margin-right: 14px; }
.smallNote { font-size: 13px; color: var(--muted); }
.bigScore { font-size: 64px; font-weight: 850; margin-top: 10px; }
.verdict { font-size: 20px; font-weight: 750; margin-top: 6px; }
.micro { color: var(--muted); margin-top: 8px; line-height: 1.5; }
.footerLine { font-size: 12px; color: var(--muted); margin-top: 18px; }
.bar { height: 10px; border-radius: 999px; background: rgba(255,255,255,0.08); overflow: hidden; margin-top: 6px; }
.bar > div { height: 100%; background: rgba(255,255,255,0.86); }
.hr { height: 1px; background: rgba(255,255,255,0.08); margin: 22px 0; }
"#;

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <meta name=\"description\" content=\"A 60-second reality check for people responsible for risk.\">\
         <title>{}</title><style>{STYLE}</style></head>\
         <body><main class=\"container\">{body}</main></body></html>",
        escape_xml(title)
    ))
}

pub(crate) async fn landing_handler() -> Html<String> {
    let body = r#"<div class="card">
<div class="kicker">Compliance reality check</div>
<h1 class="h1">How would your compliance hold up under pressure?</h1>
<p class="sub">A 60-second self-check based on how your controls actually run day to day, not how your policy says they should.</p>
<div class="row"><a class="btn btnPrimary" href="/score">Check my score</a>
<span class="smallNote">No frameworks. No email gate. No vendor pitch.</span></div>
<div class="hr"></div>
<div class="smallNote">Built quietly by an operator.</div>
</div>"#;
    page("Compliance Score", body)
}

pub(crate) async fn quiz_handler(State(state): State<AppState>) -> Html<String> {
    let microcopy = state.with_rng(|rng| microcopy_for(&state.profile, rng));
    let mut body = String::new();
    body.push_str(
        r#"<form method="post" action="/score" class="stack">
<div class="card"><div class="kicker">Answer yes or no</div>
<h1 class="h1">No explanations. No caveats.</h1>
<p class="sub">If this feels unfair, that is usually the point.</p></div>"#,
    );
    for (idx, question) in state.profile.questions.iter().enumerate() {
        body.push_str(&format!(
            "<div class=\"card tight\"><div style=\"font-weight:650;line-height:1.35\">{q}</div>\
             <div class=\"row\" style=\"margin-top:12px\">\
             <label class=\"pill\"><input type=\"radio\" name=\"q{idx}\" value=\"yes\"> Yes</label>\
             <label class=\"pill\"><input type=\"radio\" name=\"q{idx}\" value=\"no\" checked> No</label>\
             </div></div>",
            q = escape_xml(question)
        ));
    }
    body.push_str(&format!(
        "<div class=\"card\"><div class=\"row\">\
         <button type=\"submit\" class=\"btn btnPrimary\">See my score</button>\
         <div class=\"smallNote\">{}</div></div>\
         <div class=\"footerLine\">Tip: download the share card or the one-page breakdown.</div></div></form>",
        escape_xml(microcopy)
    ));
    page("Compliance Score", &body)
}

pub fn answers_from_form(form: &HashMap<String, String>) -> AnswerVector {
    let mut answers = [false; ANSWER_COUNT];
    for (idx, answer) in answers.iter_mut().enumerate() {
        *answer = form
            .get(&format!("q{idx}"))
            .is_some_and(|v| v.eq_ignore_ascii_case("yes"));
    }
    AnswerVector::new(answers)
}

pub(crate) async fn result_handler(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let answers = answers_from_form(&form);
    let summary = state.with_rng(|rng| summarize(&state.profile, &answers, rng));
    let benchmark = state.benchmarker.submit(summary.score).await;
    info!(
        score = summary.score.value(),
        avg_score = benchmark.avg_score,
        n = benchmark.n,
        "quiz completed"
    );
    let window_days = state.benchmarker.window_days();
    let copy = microcopy_index(&state.profile, summary.microcopy);
    page(
        "Your compliance score",
        &render_result(&summary, &benchmark, window_days, &answers, copy),
    )
}

pub fn render_result(
    summary: &ScoreSummary,
    benchmark: &Benchmark,
    window_days: u32,
    answers: &AnswerVector,
    copy: Option<usize>,
) -> String {
    let bits = answers.to_bits();
    let copy = copy.map(|idx| format!("&amp;copy={idx}")).unwrap_or_default();
    let mut body = String::new();
    body.push_str(
        "<div class=\"stack\"><div class=\"row\" style=\"justify-content:space-between\">\
         <div class=\"smallNote\">Your result</div>\
         <a class=\"btn\" href=\"/score\">New run</a></div>",
    );
    body.push_str(&format!(
        "<div class=\"card\" style=\"max-width:560px\"><div class=\"kicker\">{}</div>\
         <div class=\"bigScore\">{} / 100</div><div class=\"verdict\">{}</div>\
         <div class=\"micro\">{}</div><div class=\"footerLine\">{}</div></div>",
        escape_xml(CARD_KICKER),
        summary.score,
        escape_xml(summary.verdict),
        escape_xml(summary.microcopy),
        escape_xml(CARD_FOOTER)
    ));
    body.push_str(
        "<div class=\"card\" style=\"max-width:560px\">\
         <div style=\"font-size:14px;font-weight:800;margin-bottom:10px\">How you compare</div>",
    );
    body.push_str(&bar("Your score", summary.score.value() as i64));
    body.push_str("<div style=\"height:10px\"></div>");
    body.push_str(&bar(
        &format!("Org average ({window_days}d)"),
        benchmark.avg_score,
    ));
    body.push_str(&format!(
        "<div class=\"micro\" style=\"margin-top:12px\">Teams tend to score slightly higher than individuals, \
         not because controls work better, but because gaps are distributed.</div>\
         <div class=\"smallNote\" style=\"margin-top:8px\">Benchmark based on {} anonymous submissions in the last {} days.</div></div>",
        benchmark.n, window_days
    ));
    body.push_str(&format!(
        "<div class=\"card\" style=\"max-width:560px\">\
         <div style=\"font-size:16px;font-weight:850\">Want to know where the gaps actually are?</div>\
         <div class=\"micro\">Get a one-page breakdown of which answers impacted your score most \
         and what operational teams typically address first.</div>\
         <div class=\"row\" style=\"margin-top:12px\">\
         <a class=\"btn\" href=\"/report.pdf?answers={bits}{copy}\">Get the 1-page Reality Breakdown</a>\
         <span class=\"smallNote\">No mailing lists. No demos.</span></div></div>\
         <div class=\"row\"><a class=\"btn btnPrimary\" href=\"/card.svg?answers={bits}{copy}\">Download share card</a>\
         <a class=\"btn\" href=\"/score\">Retake</a></div>\
         <div class=\"smallNote\">Built by an active security &amp; compliance operator.</div></div>"
    ));
    body
}

fn bar(label: &str, value: i64) -> String {
    let v = value.clamp(0, 100);
    format!(
        "<div><div class=\"row\" style=\"justify-content:space-between;font-size:12px;color:var(--muted)\">\
         <span>{}</span><span>{v}</span></div>\
         <div class=\"bar\"><div style=\"width:{v}%\"></div></div></div>",
        escape_xml(label)
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswersQuery {
    answers: Option<String>,
    copy: Option<usize>,
}

fn parse_query(query: &AnswersQuery) -> Result<AnswerVector, Response> {
    let raw = query.answers.as_deref().ok_or_else(|| {
        error_json(
            StatusCode::BAD_REQUEST,
            "invalid input",
            Some("missing answers".to_string()),
        )
    })?;
    raw.parse::<AnswerVector>().map_err(|e| {
        error_json(StatusCode::BAD_REQUEST, "invalid input", Some(e.to_string()))
    })
}

pub(crate) async fn card_handler(
    State(state): State<AppState>,
    Query(query): Query<AnswersQuery>,
) -> Response {
    let answers = match parse_query(&query) {
        Ok(answers) => answers,
        Err(resp) => return resp,
    };
    let mut summary = state.with_rng(|rng| summarize(&state.profile, &answers, rng));
    if let Some(microcopy) = pinned_microcopy(&state.profile, query.copy) {
        summary.microcopy = microcopy;
    }
    (
        [
            (CONTENT_TYPE, "image/svg+xml".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", card_filename(&summary)),
            ),
            (CACHE_CONTROL, "no-store".to_string()),
        ],
        render_card_svg(&summary),
    )
        .into_response()
}

pub(crate) async fn report_pdf_handler(
    State(state): State<AppState>,
    Query(query): Query<AnswersQuery>,
) -> Response {
    let answers = match parse_query(&query) {
        Ok(answers) => answers,
        Err(resp) => return resp,
    };
    let mut doc = state.with_rng(|rng| {
        let score = score_answers(&answers, &state.profile.weights);
        build_report(&state.profile, score, &answers, rng)
    });
    if let Some(microcopy) = pinned_microcopy(&state.profile, query.copy) {
        doc.microcopy = microcopy;
    }
    pdf_response(&doc)
}
