use std::path::PathBuf;

use crate::cli::{Args, Method};
use crate::quality::{default_step_ladder, QualityProfile, QualityStep, DEFAULT_PROFILE_LADDER};
use crate::tools::Toolchain;

/// Everything a compression run needs.
#[derive(Debug, Clone)]
pub struct CompressOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Advisory ceiling in MB.
    pub target_mb: Option<f64>,
    pub method: Method,
    /// Ghostscript profiles for [`Method::WholeDocument`], tried in order.
    pub profiles: Vec<QualityProfile>,
    /// Re-encoding steps for [`Method::ImageReprocess`], tried in order.
    pub steps: Vec<QualityStep>,
    pub tools: Toolchain,
    pub scratch_root: Option<PathBuf>,
}

impl CompressOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            target_mb: None,
            method: Method::default(),
            profiles: DEFAULT_PROFILE_LADDER.to_vec(),
            steps: default_step_ladder(),
            tools: Toolchain::default(),
            scratch_root: None,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        let mut options = Self::new(args.input.clone(), args.output_path());
        options.target_mb = args.size;
        options.method = args.method;
        options.scratch_root = args.temp_dir.clone();
        if let Some(ref gs) = args.gs {
            options.tools.ghostscript = gs.clone();
        }
        if let Some(ref pdfimages) = args.pdfimages {
            options.tools.pdfimages = pdfimages.clone();
        }
        if let Some(ref img2pdf) = args.img2pdf {
            options.tools.img2pdf = img2pdf.clone();
        }
        options
    }

    pub fn with_target_mb(mut self, target_mb: f64) -> Self {
        self.target_mb = Some(target_mb);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }
}
