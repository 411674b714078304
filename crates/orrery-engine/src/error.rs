use thiserror::Error;

/// Result alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, OrreryError>;

/// Errors surfaced by asset and data plumbing.
///
/// None of these are fatal: the runner logs them and the scene keeps ticking
/// with whatever fallback the caller chose (untextured material, empty info).
#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown texture id {0}")]
    UnknownTexture(u32),

    #[error("texture '{path}' could not be registered")]
    TextureLoad { path: String },

    #[error("no handler for data key '{0}'")]
    UnknownDataKey(String),
}
