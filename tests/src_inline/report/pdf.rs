use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::engine::Score;
use crate::model::{AnswerVector, QuizProfile};
use crate::report::build_report;

#[test]
fn test_render_pdf_produces_pdf_bytes() {
    let profile = QuizProfile::compliance_v1();
    let mut rng = StdRng::seed_from_u64(2);
    let doc = build_report(
        &profile,
        Score::clamped(55),
        &AnswerVector::new([true, true, false, true, false, false]),
        &mut rng,
    );
    let bytes = render_pdf(&doc).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn test_pdf_safe_maps_typography() {
    assert_eq!(pdf_safe("35–55"), "35-55");
    assert_eq!(pdf_safe("a — b"), "a - b");
    assert_eq!(pdf_safe("“quoted” it’s"), "\"quoted\" it's");
    assert_eq!(pdf_safe("• item"), "- item");
    assert_eq!(pdf_safe("naïve"), "na?ve");
}

#[test]
fn test_wrap_respects_width() {
    let lines = wrap("one two three four five six", 9);
    assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
    for line in &lines {
        assert!(line.chars().count() <= 9);
    }
}

#[test]
fn test_wrap_edge_cases() {
    assert_eq!(wrap("", 10), vec![String::new()]);
    assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    assert_eq!(wrap("short", 80), vec!["short"]);
}
