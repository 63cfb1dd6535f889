//! Degradation levels of the adaptation pipeline.

/// How far the adapter had to degrade to produce output.
///
/// Levels only move forward: each failure advances to the next level, and
/// [`Level::Silence`] cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Decode, downmix, resample, prepend the pilot tone, encode.
    FullPipeline,
    /// Wrap raw PCM re-supplied by the source in a WAV container.
    RawPcmFallback,
    /// Emit the diagnostic tone alone.
    ToneOnly,
    /// Emit a fixed stretch of silence.
    Silence,
}

impl Level {
    /// Returns the level to try after this one fails.
    pub fn next(self) -> Option<Level> {
        match self {
            Level::FullPipeline => Some(Level::RawPcmFallback),
            Level::RawPcmFallback => Some(Level::ToneOnly),
            Level::ToneOnly => Some(Level::Silence),
            Level::Silence => None,
        }
    }

    /// Returns true if the output carries the caller's speech.
    pub fn has_speech(self) -> bool {
        matches!(self, Level::FullPipeline | Level::RawPcmFallback)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::FullPipeline => "full pipeline",
            Level::RawPcmFallback => "raw pcm fallback",
            Level::ToneOnly => "tone only",
            Level::Silence => "silence",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_are_one_directional() {
        let mut level = Level::FullPipeline;
        let mut seen = vec![level];
        while let Some(next) = level.next() {
            assert!(next > level);
            level = next;
            seen.push(level);
        }
        assert_eq!(
            seen,
            vec![Level::FullPipeline, Level::RawPcmFallback, Level::ToneOnly, Level::Silence]
        );
    }

    #[test]
    fn test_has_speech() {
        assert!(Level::FullPipeline.has_speech());
        assert!(Level::RawPcmFallback.has_speech());
        assert!(!Level::ToneOnly.has_speech());
        assert!(!Level::Silence.has_speech());
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::RawPcmFallback.to_string(), "raw pcm fallback");
    }
}
