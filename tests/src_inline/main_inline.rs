use rand::Rng;

use super::*;

#[test]
fn test_cli_parses_score_command() {
    let cli = Cli::try_parse_from(["compliance-score", "score", "--answers", "101001", "--json"])
        .expect("parse score command");
    let Command::Score(args) = cli.command else {
        panic!("expected score command");
    };
    assert_eq!(args.answers.to_bits(), "101001");
    assert!(args.json);
}

#[test]
fn test_cli_parses_report_command() {
    let cli = Cli::try_parse_from([
        "compliance-score",
        "report",
        "--answers",
        "y,n,y,n,n,y",
        "--out",
        "out/report.txt",
        "--format",
        "text",
    ])
    .expect("parse report command");
    let Command::Report(args) = cli.command else {
        panic!("expected report command");
    };
    assert_eq!(args.answers.to_bits(), "101001");
    assert_eq!(args.format, ReportFormat::Text);
    assert_eq!(args.out, Path::new("out/report.txt"));
}

#[test]
fn test_cli_rejects_bad_answers() {
    assert!(Cli::try_parse_from(["compliance-score", "score", "--answers", "1010"]).is_err());
    assert!(Cli::try_parse_from(["compliance-score", "score", "--answers", "10100x"]).is_err());
    assert!(Cli::try_parse_from(["compliance-score", "score"]).is_err());
}

#[test]
fn test_seeded_rng_is_deterministic() {
    let mut a = rng_from_seed(Some(42));
    let mut b = rng_from_seed(Some(42));
    let xs: Vec<u32> = (0..4).map(|_| a.r#gen()).collect();
    let ys: Vec<u32> = (0..4).map(|_| b.r#gen()).collect();
    assert_eq!(xs, ys);
}

#[test]
fn test_write_output_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("compliance-score-test-{}", std::process::id()));
    let path = dir.join("nested").join("report.txt");
    write_output(&path, b"hello").expect("write output");
    assert_eq!(std::fs::read(&path).expect("read back"), b"hello");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_report_command_writes_text_report() {
    let dir = std::env::temp_dir().join(format!("compliance-score-report-{}", std::process::id()));
    let out = dir.join("report.txt");
    let args = ReportArgs {
        answers: "000001".parse().expect("answers"),
        out: out.clone(),
        format: ReportFormat::Text,
        profile: ProfileArgs {
            microcopy: crate::model::profile::MicrocopyMode::Fixed,
            gap_polarity: crate::model::GapPolarity::GapOnFalse,
            seed: Some(1),
        },
    };
    report(&args).expect("report written");
    let text = std::fs::read_to_string(&out).expect("read report");
    assert!(text.contains("25"));
    assert!(text.contains("Foundational gaps present."));
    let _ = std::fs::remove_dir_all(&dir);
}
