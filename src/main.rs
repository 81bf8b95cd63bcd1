use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pdf_shrink::cli::Args;
use pdf_shrink::{compress_pdf, CompressOptions};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose > 0 {
        logger.filter_level(match args.verbose {
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        });
    }
    logger.init();

    let options = CompressOptions::from_args(&args);

    println!("Compressing PDF: {:?}", options.input);
    let start = Instant::now();
    let outcome = compress_pdf(&options)
        .with_context(|| format!("Failed to compress {}", options.input.display()))?;

    println!(
        "Kept {} ({:.2} MB) in {:.2?}",
        outcome.applied,
        outcome.report.output_mb,
        start.elapsed()
    );
    println!("Output saved to: {:?}", options.output);

    Ok(())
}
