use std::fmt;

use crate::quality::{QualityProfile, QualityStep};
use crate::size::SizeReport;

/// The setting that produced the final output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Profile(QualityProfile),
    Step(QualityStep),
    /// Ghostscript rewrite after every image step failed.
    Fallback(QualityProfile),
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Applied::Profile(profile) => write!(f, "Ghostscript {}", profile),
            Applied::Step(step) => write!(f, "re-encoded images, {}", step),
            Applied::Fallback(profile) => write!(f, "Ghostscript {} (fallback)", profile),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOutcome {
    pub applied: Applied,
    pub report: SizeReport,
    /// False when the ladder ran out above the target.
    pub met_target: bool,
}
