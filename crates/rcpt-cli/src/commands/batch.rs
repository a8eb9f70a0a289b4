//! Batch processing command for multiple receipt images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use rcpt_core::eval::validate;
use rcpt_core::extract::{GeminiExtractor, ImageInput, ReceiptExtractor};
use rcpt_core::models::receipt::Receipt;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file JSON records
    #[arg(short, long, default_value = "extracted")]
    output_dir: PathBuf,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// API key (overrides GEMINI_API_KEY / GOOGLE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    receipt: Option<Receipt>,
    passed: bool,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg" | "webp")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let Some(api_key) = super::resolve_api_key(args.api_key.as_deref()) else {
        anyhow::bail!("API key missing. Set GEMINI_API_KEY or pass --api-key.");
    };
    let extractor = GeminiExtractor::new(&config, api_key)?;

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_single(&extractor, &path, &args.output_dir).await {
            Ok((receipt, passed)) => {
                results.push(BatchResult { path, receipt: Some(receipt), passed, error: None });
            }
            Err(e) => {
                if !args.continue_on_error {
                    pb.abandon();
                    return Err(e.context(format!("while processing {}", path.display())));
                }
                warn!("{}: {e}", path.display());
                results.push(BatchResult {
                    path,
                    receipt: None,
                    passed: false,
                    error: Some(e.to_string()),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&results, &summary_path)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let extracted = results.iter().filter(|r| r.receipt.is_some()).count();
    let failed = results.len() - extracted;
    println!(
        "{} Extracted {}/{} receipts in {:.1?}",
        style("✓").green(),
        extracted,
        results.len(),
        start.elapsed()
    );
    if failed > 0 {
        println!("{} {} files failed", style("⚠").yellow(), failed);
    }

    Ok(())
}

/// Extract, validate, and write the JSON record for one image.
async fn process_single(
    extractor: &GeminiExtractor,
    path: &Path,
    output_dir: &Path,
) -> anyhow::Result<(Receipt, bool)> {
    let image = ImageInput::from_path(path)?;

    let receipt = extractor
        .process(&image)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no receipt data could be extracted"))?;

    let (passed, _) = validate(Some(&receipt));

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt");
    let out_path = output_dir.join(format!("{stem}.json"));
    fs::write(&out_path, serde_json::to_string_pretty(&receipt)?)?;

    Ok((receipt, passed))
}

/// Write one summary row per input file.
fn write_summary(results: &[BatchResult], path: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "merchant", "date", "total_amount", "currency", "verdict"])?;

    for result in results {
        match &result.receipt {
            Some(receipt) => wtr.write_record([
                result.path.display().to_string(),
                receipt.merchant_name.clone(),
                receipt.date.clone(),
                receipt.total_amount.to_string(),
                receipt.currency.clone(),
                if result.passed { "PASS" } else { "FAIL" }.to_string(),
            ])?,
            None => wtr.write_record([
                result.path.display().to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                format!("ERROR: {}", result.error.as_deref().unwrap_or("unknown")),
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}
