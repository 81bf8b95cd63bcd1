//! Shrink PDF files by driving external tools through a ladder of quality
//! settings until the output fits a target size.
//!
//! Two methods are available:
//!
//! * whole-document: Ghostscript's `pdfwrite` at the `ebook`, then `screen`
//!   profile;
//! * image re-encoding: `pdfimages` extracts the raster images, each is
//!   re-encoded as JPEG at decreasing quality and resolution, and `img2pdf`
//!   reassembles them. Ghostscript at `screen` is the last resort.
//!
//! ```no_run
//! use pdf_shrink::{compress_pdf, CompressOptions, Method};
//!
//! let options = CompressOptions::new("scan.pdf", "scan-small.pdf")
//!     .with_method(Method::ImageReprocess)
//!     .with_target_mb(2.0);
//! let outcome = compress_pdf(&options).unwrap();
//! println!("kept {} at {:.2} MB", outcome.applied, outcome.report.output_mb);
//! ```

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod ghostscript;
pub mod outcome;
pub mod preflight;
pub mod quality;
pub mod reimage;
pub mod size;
pub mod staging;
pub mod tools;

pub use cli::Method;
pub use config::CompressOptions;
pub use error::{CompressError, Result};
pub use outcome::{Applied, CompressionOutcome};
pub use quality::{QualityProfile, QualityStep};
pub use size::SizeReport;
pub use tools::{SystemRunner, ToolRunner, Toolchain};

/// Runs [`driver::run`] against the real external tools.
pub fn compress_pdf(options: &CompressOptions) -> Result<CompressionOutcome> {
    driver::run(&SystemRunner, options)
}
