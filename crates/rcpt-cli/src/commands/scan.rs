//! Scan command - extract data from a single receipt image.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use rcpt_core::eval::{Report, validate};
use rcpt_core::extract::{GeminiExtractor, ImageInput, ReceiptExtractor};
use rcpt_core::render::render;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input image (PNG, JPEG, or WebP)
    #[arg(required = true)]
    input: PathBuf,

    /// Where to write the extracted JSON record
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// Output format printed to stdout
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// API key (overrides GEMINI_API_KEY / GOOGLE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Skip the evaluation report
    #[arg(long)]
    no_eval: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rendered fixed-width receipt
    Text,
    /// Raw JSON record
    Json,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let Some(api_key) = super::resolve_api_key(args.api_key.as_deref()) else {
        anyhow::bail!("API key missing. Set GEMINI_API_KEY or pass --api-key.");
    };

    let image = ImageInput::from_path(&args.input)?;
    let extractor = GeminiExtractor::new(&config, api_key)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Analyzing {}...", args.input.display()));

    let result = extractor.process(&image).await;
    pb.finish_and_clear();

    let receipt = match result {
        Ok(Some(receipt)) => receipt,
        Ok(None) => {
            // Nothing extracted: surface the evaluator's no-data report.
            let (_, report) = validate(None);
            print_report(&report);
            anyhow::bail!(
                "No receipt data could be extracted from {}",
                args.input.display()
            );
        }
        Err(e) => anyhow::bail!("Extraction failed: {e}"),
    };

    if NaiveDate::parse_from_str(&receipt.date, "%Y-%m-%d").is_err() {
        warn!("extracted date {:?} is not in YYYY-MM-DD form", receipt.date);
    }

    match args.format {
        OutputFormat::Text => println!("{}", render(&receipt)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&receipt)?),
    }

    fs::write(&args.output, serde_json::to_string_pretty(&receipt)?)?;
    println!(
        "\n{} Saved result to {}",
        style("✓").green(),
        args.output.display()
    );

    if !args.no_eval {
        println!();
        let (_, report) = validate(Some(&receipt));
        print_report(&report);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Print the evaluation report in the fixed CLI layout.
fn print_report(report: &Report) {
    println!("{}", "-".repeat(45));
    println!("EVALUATION REPORT");
    match report {
        Report::Unevaluated { error } => {
            println!("{} {}", style("[ERROR]").red(), error);
        }
        Report::Evaluated { checks, status } => {
            for check in checks {
                let tag = if check.passed {
                    style("[PASS]").green()
                } else {
                    style("[FAIL]").red()
                };
                println!("{tag} {}", check.rule);
                if let Some(info) = &check.info {
                    println!("       {info}");
                }
            }
            println!("VERDICT: {status}");
        }
    }
    println!("{}", "-".repeat(45));
}
