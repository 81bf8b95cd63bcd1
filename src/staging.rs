//! Atomic replacement of the output file.
//!
//! Each attempt writes into a temporary file in the destination's directory,
//! which is renamed over the destination only once the attempt succeeded.
//! A failed or interrupted attempt leaves the previous output untouched.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::{CompressError, Result};

pub struct StagedOutput {
    path: TempPath,
    dest: PathBuf,
}

impl StagedOutput {
    pub fn new(dest: &Path) -> Result<Self> {
        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".pdf-shrink-").suffix(".pdf");
        // tempfile defaults to 0600; a fresh output gets the usual 0666 & !umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let path = builder.tempfile_in(dir)?.into_temp_path();
        Ok(Self {
            path,
            dest: dest.to_path_buf(),
        })
    }

    /// Where the attempt should write.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Publishes what `program` wrote. An empty staged file is rejected and
    /// the destination is left alone.
    pub fn commit(self, program: &str) -> Result<()> {
        ensure_written(self.path(), program)?;
        self.persist()
    }

    fn persist(self) -> Result<()> {
        // An existing destination keeps its permissions.
        if let Ok(metadata) = fs::metadata(&self.dest) {
            fs::set_permissions(self.path(), metadata.permissions())?;
        }
        self.path
            .persist(&self.dest)
            .map_err(|e| CompressError::Io(e.error))
    }
}

/// Fails unless `path` exists and is non-empty.
fn ensure_written(path: &Path, program: &str) -> Result<()> {
    let missing = || CompressError::MissingOutput {
        program: program.to_string(),
        path: path.to_path_buf(),
    };
    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > 0 => Ok(()),
        Ok(_) => Err(missing()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(missing()),
        Err(e) => Err(CompressError::Io(e)),
    }
}

/// Copies the file `program` produced at `src` to `dest` through a staged file.
pub fn publish_copy(src: &Path, dest: &Path, program: &str) -> Result<()> {
    ensure_written(src, program)?;
    let staged = StagedOutput::new(dest)?;
    fs::copy(src, staged.path())?;
    staged.persist()
}
