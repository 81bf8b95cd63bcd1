use std::path::Path;

use lopdf::Document;

use crate::error::{CompressError, Result};
use crate::size::file_size_mb;

/// Checks the input before any external tool runs.
///
/// A missing file or an encrypted document is an error. A file lopdf cannot
/// parse is only logged; Ghostscript tolerates more damage than lopdf does.
pub fn check(input: &Path) -> Result<()> {
    let size_mb = file_size_mb(input).map_err(|e| match e {
        CompressError::FileNotFound { path } => CompressError::InputNotFound { path },
        other => other,
    })?;
    log::info!("Input: {} ({:.2} MB)", input.display(), size_mb);

    match Document::load(input) {
        Ok(doc) => {
            if doc.is_encrypted() {
                return Err(CompressError::Encrypted {
                    path: input.to_path_buf(),
                });
            }
            log::info!("Input has {} pages", doc.get_pages().len());
        }
        Err(e) => {
            log::warn!("Could not parse {}: {:?}", input.display(), e);
        }
    }
    Ok(())
}
