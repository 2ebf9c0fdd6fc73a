//! CLI binary for pitchlens.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalysisConfig` and renders the evaluation report.

use anyhow::{Context, Result};
use clap::Parser;
use pitchlens::{analyze, analyze_to_file, sections, AnalysisConfig, AnalysisResult, RiskLevel};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

/// Colour a rating on the 1–10 scale: strong green, average yellow, weak red.
fn rating_colour(value: f64, s: &str) -> String {
    if value >= 8.0 {
        green(s)
    } else if value >= 6.0 {
        yellow(s)
    } else {
        red(s)
    }
}

fn risk_colour(level: RiskLevel, s: &str) -> String {
    match level {
        RiskLevel::High => red(s),
        RiskLevel::Medium => yellow(s),
        RiskLevel::Low => green(s),
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyze a deck, human-readable report
  pitchlens deck.pdf

  # Write the evaluation as JSON to a file
  pitchlens deck.pdf -o report.json

  # JSON on stdout
  pitchlens --json deck.docx > report.json

  # Preview the detected sections (no API key needed)
  pitchlens --sections-only deck.md

  # Use a specific model and a lower temperature
  pitchlens --model compound-beta-mini --temperature 0.2 deck.pdf

  # Custom evaluation instructions
  pitchlens --prompt my-rubric.txt deck.pdf

SUPPORTED FORMATS:
  pdf, docx, txt, md, html — detected from the file extension.

ENVIRONMENT VARIABLES:
  PITCHLENS_API_KEY   API key for the provider (or GROQ_API_KEY)
  PITCHLENS_API_URL   Override the chat-completions endpoint URL
  PITCHLENS_MODEL     Override the model ID
  PDFIUM_LIB_PATH     Path to an existing libpdfium (PDF input only)

SETUP:
  1. Set API key:   export GROQ_API_KEY=gsk_...
  2. Analyze:       pitchlens deck.pdf
"#;

/// Analyze startup pitch decks with an LLM evaluation.
#[derive(Parser, Debug)]
#[command(
    name = "pitchlens",
    version,
    about = "Analyze startup pitch decks with an LLM evaluation",
    long_about = "Extract text from a pitch deck (PDF, DOCX, TXT, MD or HTML), split it into \
named sections, and rate it with a venture-capital evaluation rubric against an \
OpenAI-compatible chat-completions endpoint (Groq by default).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Pitch deck file: .pdf, .docx, .txt, .md or .html.
    input: PathBuf,

    /// Write the evaluation as JSON to this file instead of printing it.
    #[arg(short, long, env = "PITCHLENS_OUTPUT")]
    output: Option<PathBuf>,

    /// Model ID sent to the provider.
    #[arg(long, env = "PITCHLENS_MODEL")]
    model: Option<String>,

    /// Chat-completions endpoint URL.
    #[arg(long, env = "PITCHLENS_API_URL")]
    api_url: Option<String>,

    /// Provider API key. Falls back to GROQ_API_KEY.
    #[arg(long, env = "PITCHLENS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "PITCHLENS_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Provider call timeout in seconds.
    #[arg(long, env = "PITCHLENS_API_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Path to a text file with custom evaluation instructions.
    #[arg(long, env = "PITCHLENS_PROMPT")]
    prompt: Option<PathBuf>,

    /// Output structured JSON instead of the human-readable report.
    #[arg(long, env = "PITCHLENS_JSON")]
    json: bool,

    /// Print the detected sections only, no provider call.
    #[arg(long)]
    sections_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PITCHLENS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the report itself.
    #[arg(short, long, env = "PITCHLENS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Sections-only mode ───────────────────────────────────────────────
    if cli.sections_only {
        let map = sections(&cli.input)
            .await
            .context("Failed to read sections")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&map).context("Failed to serialize sections")?
            );
        } else if map.is_empty() {
            eprintln!(
                "{} No sections detected in {}",
                yellow("⚠"),
                cli.input.display()
            );
        } else {
            for (key, body) in map.iter() {
                println!("{}", cyan(&format!("── {key} ──")));
                println!("{body}\n");
            }
            eprintln!("{} {} section(s) detected", green("✔"), map.len());
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli).await?;

    // ── Run analysis ─────────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let result = analyze_to_file(&cli.input, output_path, &config)
            .await
            .context("Analysis failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  rating {}  →  {}",
                green("✔"),
                bold(&format!("{:.1}/10", result.overall_rating)),
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let result = analyze(&cli.input, &config)
            .await
            .context("Analysis failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&result).context("Failed to serialise result")?;
            println!("{json}");
        } else {
            print_report(&cli.input, &result)?;
        }
    }

    Ok(())
}

/// Map CLI args to `AnalysisConfig`.
async fn build_config(cli: &Cli) -> Result<AnalysisConfig> {
    let api_key = match cli.api_key.clone() {
        Some(key) => key,
        None => std::env::var("GROQ_API_KEY").context(
            "No API key found.\nSet PITCHLENS_API_KEY or GROQ_API_KEY, or pass --api-key.",
        )?,
    };

    let mut builder = AnalysisConfig::builder()
        .api_key(api_key)
        .temperature(cli.temperature)
        .api_timeout_secs(cli.timeout);

    if let Some(ref url) = cli.api_url {
        builder = builder.api_url(url.as_str());
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.as_str());
    }
    if let Some(ref path) = cli.prompt {
        let template = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read prompt template from {:?}", path))?;
        builder = builder.prompt_override(template);
    }

    builder.build().context("Invalid configuration")
}

/// Render the human-readable evaluation report to stdout.
fn print_report(input: &std::path::Path, result: &AnalysisResult) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "\n{}", bold(&input.display().to_string()))?;
    writeln!(
        out,
        "{} {}",
        bold("Overall rating:"),
        rating_colour(
            result.overall_rating,
            &format!("{:.1}/10", result.overall_rating)
        )
    )?;
    if !result.stage_assessment.is_empty() {
        writeln!(out, "{} {}", bold("Stage:"), result.stage_assessment)?;
    }
    if !result.investment_readiness.is_empty() {
        writeln!(out, "{} {}", bold("Readiness:"), result.investment_readiness)?;
    }

    if !result.section_ratings.is_empty() {
        writeln!(out, "\n{}", cyan("── Section ratings ──"))?;
        for (name, rating) in &result.section_ratings {
            writeln!(
                out,
                "  {:<18} {}  {}",
                name,
                rating_colour(rating.score, &format!("{:>4.1}", rating.score)),
                dim(&format!("(weight {:.0}%)", rating.weight)),
            )?;
        }
    }

    if !result.detailed_feedback.strengths.is_empty() {
        writeln!(out, "\n{}", cyan("── Strengths ──"))?;
        for item in &result.detailed_feedback.strengths {
            writeln!(out, "  {} {}", green("✓"), item)?;
        }
    }
    if !result.detailed_feedback.critical_weaknesses.is_empty() {
        writeln!(out, "\n{}", cyan("── Critical weaknesses ──"))?;
        for item in &result.detailed_feedback.critical_weaknesses {
            writeln!(out, "  {} {}", red("✗"), item)?;
        }
    }
    if !result.detailed_feedback.section_feedback.is_empty() {
        writeln!(out, "\n{}", cyan("── Section feedback ──"))?;
        for (name, note) in &result.detailed_feedback.section_feedback {
            writeln!(out, "  {:<18} {}", name, dim(note))?;
        }
    }

    if !result.next_steps.is_empty() {
        writeln!(out, "\n{}", cyan("── Next steps ──"))?;
        for (i, step) in result.next_steps.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, step)?;
        }
    }
    if !result.comparable_companies.is_empty() {
        writeln!(out, "\n{}", cyan("── Comparable companies ──"))?;
        for company in &result.comparable_companies {
            writeln!(out, "  {} {}", dim("•"), company)?;
        }
    }
    if !result.risk_assessment.is_empty() {
        writeln!(out, "\n{}", cyan("── Risk assessment ──"))?;
        for (name, level) in &result.risk_assessment {
            writeln!(
                out,
                "  {:<18} {}",
                name,
                risk_colour(*level, &format!("{level:?}"))
            )?;
        }
    }
    writeln!(out)?;

    Ok(())
}
