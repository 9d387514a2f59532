use crate::engine::ScoreSummary;
use crate::report::{FIX_FIRST_HEADING, GAPS_HEADING, ReportDocument};

pub fn render_report_text(doc: &ReportDocument) -> String {
    let mut out = String::new();

    out.push_str(doc.title);
    out.push('\n');
    out.push_str(&"=".repeat(doc.title.chars().count()));
    out.push_str("\n\n");
    out.push_str(doc.subtitle);
    out.push_str("\n\n");

    out.push_str(&format!("Score: {} / 100\n", doc.score));
    out.push_str(&format!("Verdict: {}\n", doc.verdict));
    out.push_str(&format!("{}\n\n", doc.microcopy));

    out.push_str(GAPS_HEADING);
    out.push('\n');
    for gap in &doc.gaps {
        out.push_str(&format!("  - {gap}\n"));
    }
    out.push('\n');

    out.push_str(FIX_FIRST_HEADING);
    out.push('\n');
    for item in &doc.fix_first {
        out.push_str(&format!("  - {item}\n"));
    }
    out.push('\n');

    out.push_str(doc.footer);
    out.push('\n');
    out
}

pub fn render_summary_text(summary: &ScoreSummary) -> String {
    format!(
        "{} / 100\n{}\n{}\n",
        summary.score, summary.verdict, summary.microcopy
    )
}
