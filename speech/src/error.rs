use crate::source::SourceError;
use thiserror::Error;
use ttsbridge_audio::AudioError;

/// Errors returned by [`AudioAdapter::try_adapt`](crate::AudioAdapter::try_adapt).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdaptError {
    /// Input or target format that no fallback can serve.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("audio: {0}")]
    Audio(AudioError),

    #[error("source: {0}")]
    Source(#[from] SourceError),
}

impl AdaptError {
    /// Returns true if the adapter must stop instead of degrading.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AdaptError::UnsupportedFormat(_))
    }
}

impl From<AudioError> for AdaptError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::UnsupportedFormat(msg) => AdaptError::UnsupportedFormat(msg),
            other => AdaptError::Audio(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_stays_fatal() {
        let err = AdaptError::from(AudioError::UnsupportedFormat("6 channels".to_string()));
        assert!(err.is_fatal());
        assert_eq!(err, AdaptError::UnsupportedFormat("6 channels".to_string()));
    }

    #[test]
    fn test_other_audio_errors_recover() {
        let err = AdaptError::from(AudioError::Container("missing RIFF".to_string()));
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("missing RIFF"));
        assert!(!AdaptError::from(SourceError::Unavailable).is_fatal());
    }
}
