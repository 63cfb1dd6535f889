use thiserror::Error;

/// Errors returned by audio operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Malformed PCM data, e.g. a byte length that does not fill whole frames.
    #[error("pcm: {0}")]
    Format(String),

    /// Unparseable or unsupported container header.
    #[error("wav: {0}")]
    Container(String),

    /// Channel count or bit depth outside what this crate handles.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A resampling strategy could not run on the given input.
    #[error("resampler: {0}")]
    Resample(String),

    /// Invalid tone parameters.
    #[error("tone: {0}")]
    Tone(String),
}

impl AudioError {
    /// Returns true if the error must not be recovered by falling back to
    /// another strategy.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AudioError::UnsupportedFormat(_))
    }
}

pub type Result<T> = std::result::Result<T, AudioError>;
