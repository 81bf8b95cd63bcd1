use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Shrink a PDF with Ghostscript or by re-encoding its images
#[derive(Parser, Debug)]
#[command(name = "pdf-shrink")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input PDF file
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PDF file (defaults to compressed_<input name> in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target size in MB; the first attempt is kept when omitted
    #[arg(short, long, value_parser = parse_target_size)]
    pub size: Option<f64>,

    /// Compression method
    #[arg(short, long, value_enum, default_value = "wholeDocument")]
    pub method: Method,

    /// Ghostscript executable
    #[arg(long)]
    pub gs: Option<String>,

    /// pdfimages executable (poppler-utils)
    #[arg(long)]
    pub pdfimages: Option<String>,

    /// img2pdf executable
    #[arg(long)]
    pub img2pdf: Option<String>,

    /// Directory for intermediate images (defaults to the system temp directory)
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum Method {
    /// Rewrite the whole document with Ghostscript
    #[default]
    #[value(name = "wholeDocument", alias = "ghostscript")]
    WholeDocument,
    /// Extract, re-encode and reassemble the embedded images
    #[value(name = "imageReprocess", alias = "extract_compress")]
    ImageReprocess,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `compressed_<file name>` in the current directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => PathBuf::from(format!("compressed_{}", name.to_string_lossy())),
        None => PathBuf::from("compressed.pdf"),
    }
}

fn parse_target_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err("target size must be a positive number of megabytes".to_string())
    }
}
