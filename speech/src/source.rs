//! Collaborators that can re-supply speech as raw PCM.

use ttsbridge_audio::Format;

/// Error type for raw PCM sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("no raw pcm source configured")]
    Unavailable,
    #[error("source returned no audio")]
    Empty,
    #[error("source failed: {0}")]
    Failed(String),
}

/// Supplies the current utterance as raw 16-bit little-endian PCM.
///
/// Used by the adapter when the container it was handed cannot be adapted.
/// Implementations typically re-request the utterance from the synthesis
/// service with a headerless PCM content type at `format`'s sample rate.
/// The returned bytes are taken to be in `format`.
pub trait PcmSource: Send + Sync {
    fn raw_pcm(&self, format: Format) -> Result<Vec<u8>, SourceError>;
}

/// A source that never has audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSource;

impl PcmSource for NoSource {
    fn raw_pcm(&self, _format: Format) -> Result<Vec<u8>, SourceError> {
        Err(SourceError::Unavailable)
    }
}

/// Adapts a closure into a [`PcmSource`].
pub struct SourceFunc<F>(pub F);

impl<F> PcmSource for SourceFunc<F>
where
    F: Fn(Format) -> Result<Vec<u8>, SourceError> + Send + Sync,
{
    fn raw_pcm(&self, format: Format) -> Result<Vec<u8>, SourceError> {
        (self.0)(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_source() {
        assert_eq!(NoSource.raw_pcm(Format::MONO_48K), Err(SourceError::Unavailable));
    }

    #[test]
    fn test_source_func() {
        let source = SourceFunc(|format: Format| Ok(vec![0u8; format.frame_bytes() * 4]));
        assert_eq!(source.raw_pcm(Format::MONO_48K).unwrap().len(), 8);
    }

    #[test]
    fn test_source_error_display() {
        assert!(SourceError::Failed("timeout".to_string()).to_string().contains("timeout"));
        assert!(SourceError::Unavailable.to_string().contains("no raw pcm"));
    }
}
