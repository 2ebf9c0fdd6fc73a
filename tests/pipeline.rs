//! Integration tests for the extraction → segmentation pipeline.
//!
//! Everything here runs offline except the tests gated behind the
//! `E2E_ENABLED` environment variable, which make live provider calls
//! and decode real PDF files (requiring the pdfium shared library).
//!
//! Run the gated tests with:
//!   E2E_ENABLED=1 GROQ_API_KEY=gsk_... cargo test --test pipeline -- --nocapture

use pitchlens::{
    analyze, analyze_text, sections, sections_from_bytes, AnalysisConfig, AnalysisError,
};
use std::io::Write;
use std::path::PathBuf;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

/// Skip this test unless E2E_ENABLED is set *and* the file at `path` exists.
macro_rules! e2e_skip_unless_ready {
    ($path:expr) => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let p: PathBuf = $path;
        if !p.exists() {
            println!("SKIP — test file not found: {}", p.display());
            return;
        }
        p
    }};
}

fn offline_config() -> AnalysisConfig {
    AnalysisConfig::builder()
        .api_key("test-key")
        .api_url("http://127.0.0.1:1/v1/chat/completions")
        .build()
        .unwrap()
}

const MARKDOWN_DECK: &str = "\
# Problem
Small businesses lose 20 hours a week to manual bookkeeping.

# Solution
An accounting copilot that closes the books automatically.

# Traction
120 paying customers, $18k MRR, 15% m/m growth.

# Team
Two founders, one previous exit in fintech.
";

// ── Extraction + segmentation, per format ────────────────────────────────────

#[tokio::test]
async fn markdown_deck_segments_in_document_order() {
    let map = sections_from_bytes(MARKDOWN_DECK.as_bytes().to_vec(), "deck.md")
        .await
        .unwrap();

    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, vec!["problem", "solution", "traction", "team"]);
    assert_eq!(
        map.get("traction"),
        Some("120 paying customers, $18k MRR, 15% m/m growth.")
    );
}

#[tokio::test]
async fn all_caps_txt_deck_segments_without_markup() {
    let deck = "PROBLEM\nManual bookkeeping is slow.\nSOLUTION\nAutomate it.\n";
    let map = sections_from_bytes(deck.as_bytes().to_vec(), "deck.txt")
        .await
        .unwrap();

    assert_eq!(map.get("problem"), Some("Manual bookkeeping is slow."));
    assert_eq!(map.get("solution"), Some("Automate it."));
}

#[tokio::test]
async fn html_deck_extracts_body_and_segments() {
    let html = "<html><head><title>ignored</title><style>h1{}</style></head>\
                <body><h1>MARKET SIZE</h1><p>$4B TAM growing 30% a year.</p>\
                <h1>TEAM</h1><p>Three engineers from the payments space.</p>\
                <script>trackPageView();</script></body></html>";
    let map = sections_from_bytes(html.as_bytes().to_vec(), "deck.html")
        .await
        .unwrap();

    assert_eq!(map.get("market_size"), Some("$4B TAM growing 30% a year."));
    assert_eq!(
        map.get("team"),
        Some("Three engineers from the payments space.")
    );
    assert!(map.get("team").unwrap().find("trackPageView").is_none());
}

#[tokio::test]
async fn docx_deck_extracts_paragraphs_and_segments() {
    use docx_rs::{Docx, Paragraph, Run};

    let docx = Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("BUSINESS MODEL")))
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("SaaS, $49/month per seat.")));
    let mut buf = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();

    let map = sections_from_bytes(buf.into_inner(), "deck.docx")
        .await
        .unwrap();
    assert_eq!(map.get("business_model"), Some("SaaS, $49/month per seat."));
}

#[tokio::test]
async fn docx_table_rows_become_pipe_joined_section_lines() {
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

    let docx = Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("TRACTION")))
        .add_table(Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("MRR"))),
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("$18k"))),
        ])]));
    let mut buf = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();

    let map = sections_from_bytes(buf.into_inner(), "deck.docx")
        .await
        .unwrap();
    assert_eq!(map.get("traction"), Some("MRR | $18k"));
}

#[tokio::test]
async fn sections_reads_a_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.md");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(MARKDOWN_DECK.as_bytes()).unwrap();

    let map = sections(&path).await.unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(
        map.get("team"),
        Some("Two founders, one previous exit in fintech.")
    );
}

// ── Input rejection ──────────────────────────────────────────────────────────

#[tokio::test]
async fn unsupported_extension_is_rejected_without_reading() {
    let err = analyze("slides.pptx", &offline_config()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedFormat { .. }));
}

#[tokio::test]
async fn headerless_deck_fails_before_the_provider_call() {
    // The config points at an unroutable endpoint; reaching it would fail
    // with a Provider error, so NoSectionsFound proves we never got there.
    let err = analyze_text("a deck with no recognizable headers at all", &offline_config())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::NoSectionsFound));
}

#[tokio::test]
async fn blank_deck_fails_before_the_provider_call() {
    let err = analyze_text("\n \n\t\n", &offline_config()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyDocument));
}

#[tokio::test]
async fn unreachable_provider_is_a_provider_error() {
    // Sections exist, so the pipeline proceeds to the HTTP call and the
    // connection refusal must surface as Provider, not anything else.
    let err = analyze_text(MARKDOWN_DECK, &offline_config())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Provider { .. }));
}

// ── Gated e2e tests (live provider / real PDFs) ──────────────────────────────

#[tokio::test]
async fn e2e_pdf_deck_extracts_and_segments() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("sample_deck.pdf"));

    let map = sections(&path).await.expect("PDF extraction should succeed");
    assert!(
        !map.is_empty(),
        "sample deck should contain at least one recognizable section"
    );
    for (key, body) in map.iter() {
        println!("[{key}] {} chars", body.len());
    }
}

#[tokio::test]
async fn e2e_live_evaluation_returns_bounded_rating() {
    let path = e2e_skip_unless_ready!(test_cases_dir().join("sample_deck.md"));
    if std::env::var("PITCHLENS_API_KEY").is_err() && std::env::var("GROQ_API_KEY").is_err() {
        println!("SKIP — set PITCHLENS_API_KEY or GROQ_API_KEY for live tests");
        return;
    }

    let config = AnalysisConfig::from_env().expect("config from env");
    let result = analyze(&path, &config).await.expect("analysis should succeed");

    assert!(
        (0.0..=10.0).contains(&result.overall_rating),
        "rating out of range: {}",
        result.overall_rating
    );
    println!(
        "overall {:.1}, {} section ratings, {} next steps",
        result.overall_rating,
        result.section_ratings.len(),
        result.next_steps.len()
    );
}
