use crate::cli::Method;
use crate::config::CompressOptions;
use crate::error::Result;
use crate::outcome::CompressionOutcome;
use crate::tools::ToolRunner;
use crate::{ghostscript, preflight, reimage};

/// Compresses `options.input` into `options.output` with the configured method.
///
/// Fails before any tool runs if the input is missing or encrypted.
pub fn run(runner: &dyn ToolRunner, options: &CompressOptions) -> Result<CompressionOutcome> {
    preflight::check(&options.input)?;

    let outcome = match options.method {
        Method::WholeDocument => ghostscript::compress(
            runner,
            &options.tools,
            &options.input,
            &options.output,
            &options.profiles,
            options.target_mb,
        )?,
        Method::ImageReprocess => reimage::compress(
            runner,
            &options.tools,
            &options.input,
            &options.output,
            &options.steps,
            options.target_mb,
            options.scratch_root.as_deref(),
        )?,
    };

    if !outcome.met_target {
        if let Some(target) = options.target_mb {
            log::warn!(
                "Could not reach {:.2} MB; keeping the {} result ({:.2} MB)",
                target,
                outcome.applied,
                outcome.report.output_mb
            );
        }
    }
    Ok(outcome)
}
