//! Image re-encoding compression.
//!
//! Extracts the raster images of a PDF with `pdfimages`, re-encodes each one
//! as a JPEG at a given quality and resolution, then rebuilds a PDF from them
//! with `img2pdf`. If every step of the ladder fails, the document is handed
//! to Ghostscript at its smallest profile instead.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use lazy_static::lazy_static;
use regex::Regex;
use tempfile::TempDir;

use crate::error::{CompressError, Result};
use crate::ghostscript;
use crate::outcome::{Applied, CompressionOutcome};
use crate::quality::{QualityStep, FALLBACK_PROFILE};
use crate::size::SizeReport;
use crate::staging;
use crate::tools::{ToolRunner, Toolchain};

lazy_static! {
    static ref EXTRACTED_IMAGE: Regex = Regex::new(r"^page-(\d+)\.png$").unwrap();
}

const IMAGE_PREFIX: &str = "page";
const ASSEMBLED_PDF: &str = "output.pdf";

/// Temporary working directory, removed when dropped.
struct ScratchArea {
    dir: TempDir,
}

impl ScratchArea {
    fn new(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("pdf-shrink-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        log::debug!("Scratch directory: {}", dir.path().display());
        Ok(Self { dir })
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Removes everything inside the directory, keeping the directory.
    fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(self.path())? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    fn close(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            log::warn!(
                "Failed to remove scratch directory {}: {}",
                path.display(),
                e
            );
        }
    }
}

/// Extracted images in page order.
///
/// Sorted by the numeric index so `page-1000` follows `page-999`.
fn extracted_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(caps) = EXTRACTED_IMAGE.captures(name) {
            let index: u64 = caps[1].parse().unwrap_or(u64::MAX);
            images.push((index, name.to_string(), entry.path()));
        }
    }
    images.sort();
    Ok(images.into_iter().map(|(_, _, path)| path).collect())
}

/// Re-encodes one extracted image as an RGB JPEG next to it and removes the
/// original.
fn reencode(png: &Path, step: QualityStep) -> Result<PathBuf> {
    let img = image::open(png)?;
    let (width, height) = (img.width(), img.height());
    let rgb = img.into_rgb8();

    let jpg = png.with_extension("jpg");
    let mut writer = BufWriter::new(File::create(&jpg)?);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, step.quality());
    encoder.set_pixel_density(PixelDensity::dpi(step.dpi()));
    encoder.encode_image(&rgb)?;
    writer.flush()?;

    fs::remove_file(png)?;
    log::debug!(
        "{}: {}x{} -> JPEG(q={}, {} dpi)",
        jpg.display(),
        width,
        height,
        step.quality(),
        step.dpi()
    );
    Ok(jpg)
}

/// One ladder step. The scratch area is empty when this returns `Ok`.
fn attempt(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    scratch: &ScratchArea,
    input: &Path,
    output: &Path,
    step: QualityStep,
) -> Result<SizeReport> {
    scratch.clear()?;

    runner.run(
        &tools.pdfimages,
        &[
            OsString::from("-png"),
            input.as_os_str().to_os_string(),
            scratch.path().join(IMAGE_PREFIX).into_os_string(),
        ],
    )?;

    let extracted = extracted_images(scratch.path())?;
    if extracted.is_empty() {
        return Err(CompressError::EmptyExtraction {
            path: input.to_path_buf(),
        });
    }
    log::info!("Extracted {} images", extracted.len());

    let mut args = Vec::with_capacity(extracted.len() + 2);
    for png in &extracted {
        args.push(reencode(png, step)?.into_os_string());
    }

    let assembled = scratch.path().join(ASSEMBLED_PDF);
    args.push(OsString::from("-o"));
    args.push(assembled.clone().into_os_string());
    runner.run(&tools.img2pdf, &args)?;

    staging::publish_copy(&assembled, output, &tools.img2pdf)?;
    scratch.clear()?;

    SizeReport::measure(input, output)
}

fn walk_ladder(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    scratch: &ScratchArea,
    input: &Path,
    output: &Path,
    ladder: &[QualityStep],
    target_mb: Option<f64>,
) -> Result<CompressionOutcome> {
    if ladder.is_empty() {
        return Err(CompressError::EmptyLadder);
    }
    let last_index = ladder.len() - 1;
    let mut outcome = None;

    for (index, &step) in ladder.iter().enumerate() {
        println!("Re-encoding images at {}", step);
        match attempt(runner, tools, scratch, input, output, step) {
            Ok(report) => {
                report.print();
                let met_target = report.meets(target_mb);
                outcome = Some(CompressionOutcome {
                    applied: Applied::Step(step),
                    report,
                    met_target,
                });
                if met_target {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Image re-encoding at {} failed: {}", step, e);
                if index == last_index {
                    println!("Falling back to Ghostscript");
                    let report =
                        ghostscript::rewrite(runner, tools, input, output, FALLBACK_PROFILE)?;
                    return Ok(CompressionOutcome {
                        applied: Applied::Fallback(FALLBACK_PROFILE),
                        met_target: report.meets(target_mb),
                        report,
                    });
                }
            }
        }
    }

    outcome.ok_or(CompressError::EmptyLadder)
}

/// Walks `ladder` in order, stopping at the first result under `target_mb`.
///
/// Scratch files live under `scratch_root` (the system temp directory when
/// `None`) and are removed before this returns, whatever the result.
pub fn compress(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    input: &Path,
    output: &Path,
    ladder: &[QualityStep],
    target_mb: Option<f64>,
    scratch_root: Option<&Path>,
) -> Result<CompressionOutcome> {
    let scratch = ScratchArea::new(scratch_root)?;
    let result = walk_ladder(runner, tools, &scratch, input, output, ladder, target_mb);
    scratch.close();
    result
}
