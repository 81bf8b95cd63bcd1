use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{program} reported success but wrote nothing to {}", path.display())]
    MissingOutput { program: String, path: PathBuf },

    #[error("{} is encrypted; password-protected PDFs are not supported", path.display())]
    Encrypted { path: PathBuf },

    #[error("{program} not found; is it installed and on PATH?")]
    ToolNotFound { program: String },

    #[error("failed to start {program}: {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", exit_description(*code))]
    ToolFailed { program: String, code: Option<i32> },

    #[error("no images were extracted from {}", path.display())]
    EmptyExtraction { path: PathBuf },

    #[error("quality ladder is empty")]
    EmptyLadder,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;
