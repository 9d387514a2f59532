use crate::engine::ScoreSummary;

pub const CARD_KICKER: &str = "Compliance theater score";
pub const CARD_FOOTER: &str = "Measured in minutes. Not binders.";

pub fn card_filename(summary: &ScoreSummary) -> String {
    format!("compliance-score-{}.svg", summary.score)
}

pub fn render_card_svg(summary: &ScoreSummary) -> String {
    let mut out = String::new();
    out.push_str(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="1120" height="600" viewBox="0 0 1120 600">"##,
    );
    out.push_str(r##"<rect width="1120" height="600" rx="36" fill="#0b0f14"/>"##);
    out.push_str(r##"<rect x="24" y="24" width="1072" height="552" rx="28" fill="none" stroke="#ffffff" stroke-opacity="0.12" stroke-width="2"/>"##);
    out.push_str(&text_el(80, 110, 28, "#9ca3af", 600, &CARD_KICKER.to_uppercase()));
    out.push_str(&text_el(
        80,
        260,
        128,
        "#f9fafb",
        800,
        &format!("{} / 100", summary.score),
    ));
    out.push_str(&text_el(80, 350, 44, "#f9fafb", 700, summary.verdict));
    out.push_str(&text_el(80, 420, 30, "#d1d5db", 400, summary.microcopy));
    out.push_str(&text_el(80, 530, 24, "#9ca3af", 400, CARD_FOOTER));
    out.push_str("</svg>");
    out
}

fn text_el(x: u32, y: u32, size: u32, fill: &str, weight: u32, text: &str) -> String {
    format!(
        r#"<text x="{x}" y="{y}" font-family="Helvetica, Arial, sans-serif" font-size="{size}" font-weight="{weight}" fill="{fill}">{}</text>"#,
        escape_xml(text)
    )
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
