use std::io::ErrorKind;
use std::path::Path;

use crate::error::{CompressError, Result};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Size of `path` in megabytes (MiB).
pub fn file_size_mb(path: &Path) -> Result<f64> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CompressError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => CompressError::Io(e),
    })?;
    Ok(metadata.len() as f64 / BYTES_PER_MB)
}

/// `(1 - output/input) * 100`, or `None` for an empty input.
pub fn reduction_percent(input_mb: f64, output_mb: f64) -> Option<f64> {
    if input_mb <= 0.0 {
        return None;
    }
    Some((1.0 - output_mb / input_mb) * 100.0)
}

/// Input and output sizes of one compression attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeReport {
    pub input_mb: f64,
    pub output_mb: f64,
}

impl SizeReport {
    pub fn measure(input: &Path, output: &Path) -> Result<Self> {
        Ok(Self {
            input_mb: file_size_mb(input)?,
            output_mb: file_size_mb(output)?,
        })
    }

    pub fn reduction_percent(&self) -> Option<f64> {
        reduction_percent(self.input_mb, self.output_mb)
    }

    /// Whether the output fits under `target_mb`. No target always fits.
    pub fn meets(&self, target_mb: Option<f64>) -> bool {
        target_mb.map_or(true, |target| self.output_mb <= target)
    }

    pub fn print(&self) {
        println!("Original size:   {:.2} MB", self.input_mb);
        println!("Compressed size: {:.2} MB", self.output_mb);
        match self.reduction_percent() {
            Some(pct) => println!("Reduction:       {:.2}%", pct),
            None => log::warn!("Input is empty; skipping reduction ratio"),
        }
    }
}
