use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported format: '{ext}'")]
    UnsupportedFormat { ext: String },

    #[error("not a regular file: {path}")]
    NotAFile { path: String },

    #[error("failed to process '{file}': {detail}")]
    Extract { file: String, detail: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl SiftError {
    /// Whether the failure is a client-side input problem (bad extension,
    /// missing file) rather than a processing fault. The HTTP shell maps
    /// these to 400 and everything else to 500.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SiftError::UnsupportedFormat { .. } | SiftError::NotAFile { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;
