//! Audio container codecs.
//!
//! - `wav`: RIFF/WAVE framing for 16-bit PCM

pub mod wav;
