//! External program invocation.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::process::Command;

use crate::error::{CompressError, Result};

/// Runs an external program to completion.
///
/// The compressors only talk to Ghostscript, pdfimages and img2pdf through
/// this trait, so a scripted runner can stand in for them.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<()>;
}

/// Spawns real processes. stdout and stderr are inherited.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString]) -> Result<()> {
        log::debug!(
            "Running: {} {}",
            program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let status = Command::new(program).args(args).status().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CompressError::ToolNotFound {
                    program: program.to_string(),
                }
            } else {
                CompressError::ToolSpawn {
                    program: program.to_string(),
                    source: e,
                }
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(CompressError::ToolFailed {
                program: program.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Names of the external programs, resolved through PATH unless absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ghostscript: String,
    pub pdfimages: String,
    pub img2pdf: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            ghostscript: default_ghostscript().to_string(),
            pdfimages: "pdfimages".to_string(),
            img2pdf: "img2pdf".to_string(),
        }
    }
}

#[cfg(windows)]
fn default_ghostscript() -> &'static str {
    "gswin64c"
}

#[cfg(not(windows))]
fn default_ghostscript() -> &'static str {
    "gs"
}
