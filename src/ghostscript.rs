//! Whole-document compression through Ghostscript's pdfwrite device.

use std::ffi::OsString;
use std::path::Path;

use crate::error::{CompressError, Result};
use crate::outcome::{Applied, CompressionOutcome};
use crate::quality::QualityProfile;
use crate::size::SizeReport;
use crate::staging::StagedOutput;
use crate::tools::{ToolRunner, Toolchain};

fn ghostscript_args(input: &Path, output: &Path, profile: QualityProfile) -> Vec<OsString> {
    let mut output_arg = OsString::from("-sOutputFile=");
    output_arg.push(output);

    vec![
        OsString::from("-sDEVICE=pdfwrite"),
        OsString::from("-dCompatibilityLevel=1.4"),
        OsString::from(format!("-dPDFSETTINGS={}", profile.directive())),
        OsString::from("-dNOPAUSE"),
        OsString::from("-dQUIET"),
        OsString::from("-dBATCH"),
        output_arg,
        input.as_os_str().to_os_string(),
    ]
}

/// Rewrites `input` into `output` at a single profile and reports the sizes.
pub fn rewrite(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    input: &Path,
    output: &Path,
    profile: QualityProfile,
) -> Result<SizeReport> {
    println!("Compressing with Ghostscript at quality: {}", profile);

    let staged = StagedOutput::new(output)?;
    runner.run(
        &tools.ghostscript,
        &ghostscript_args(input, staged.path(), profile),
    )?;
    staged.commit(&tools.ghostscript)?;

    let report = SizeReport::measure(input, output)?;
    report.print();
    Ok(report)
}

/// Walks `ladder` in order, stopping at the first result under `target_mb`.
///
/// When no profile meets the target the last one's output is kept.
pub fn compress(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    input: &Path,
    output: &Path,
    ladder: &[QualityProfile],
    target_mb: Option<f64>,
) -> Result<CompressionOutcome> {
    let mut last = None;

    for &profile in ladder {
        let report = rewrite(runner, tools, input, output, profile)?;
        let met_target = report.meets(target_mb);
        last = Some(CompressionOutcome {
            applied: Applied::Profile(profile),
            report,
            met_target,
        });
        if met_target {
            break;
        }
        log::info!(
            "{:.2} MB is above the target; trying the next profile",
            report.output_mb
        );
    }

    last.ok_or(CompressError::EmptyLadder)
}
