//! WAV (RIFF/WAVE) container framing for 16-bit PCM.
//!
//! [`decode`] walks the RIFF chunk list instead of assuming the canonical
//! 44-byte layout, so files with extra chunks (`LIST`, `fact`, ...), an
//! extended `fmt ` body, or `data` placed before `fmt ` still decode. Such
//! irregularities are logged as warnings. A bit depth other than 16 is always
//! rejected.
//!
//! # Example
//!
//! ```rust
//! use ttsbridge_audio::codec::wav;
//! use ttsbridge_audio::pcm::{Format, PcmBuffer};
//!
//! let pcm = PcmBuffer::from_samples(Format::MONO_48K, &[0, 100, -100]).unwrap();
//! let blob = wav::encode(&pcm, Format::MONO_48K).unwrap();
//! let (decoded, format) = wav::decode(&blob).unwrap();
//! assert_eq!(decoded, pcm);
//! assert_eq!(format, Format::MONO_48K);
//! ```

mod header;

pub use header::{FORMAT_EXTENSIBLE, FORMAT_PCM, HEADER_LEN, Header};

use crate::error::{AudioError, Result};
use crate::pcm::{BITS_PER_SAMPLE, Format, PcmBuffer};
use header::{DATA, FMT, Fields, RIFF, WAVE};
use tracing::{debug, warn};

/// Placeholder length written by streaming encoders that never seek back.
const UNKNOWN_LEN: u32 = u32::MAX;

/// Returns true if `blob` starts with a plausible RIFF/WAVE header.
pub fn looks_like_wav(blob: &[u8]) -> bool {
    blob.len() > HEADER_LEN && &blob[0..4] == RIFF && &blob[8..12] == WAVE
}

/// Decodes a WAV blob into its PCM payload and format.
pub fn decode(blob: &[u8]) -> Result<(PcmBuffer, Format)> {
    if blob.len() < HEADER_LEN {
        return Err(AudioError::Container(format!(
            "{} bytes is shorter than the {}-byte header",
            blob.len(),
            HEADER_LEN
        )));
    }
    if &blob[0..4] != RIFF {
        return Err(AudioError::Container("missing RIFF marker".to_string()));
    }
    if &blob[8..12] != WAVE {
        return Err(AudioError::Container("missing WAVE marker".to_string()));
    }

    let riff_len = u32::from_le_bytes([blob[4], blob[5], blob[6], blob[7]]);
    if riff_len != UNKNOWN_LEN && riff_len as usize + 8 != blob.len() {
        debug!(riff_len, blob_len = blob.len(), "wav: RIFF length does not match blob size");
    }

    let (header, payload) = scan_chunks(blob)?;

    match header.audio_format {
        FORMAT_PCM => {}
        FORMAT_EXTENSIBLE => {
            debug!("wav: WAVE_FORMAT_EXTENSIBLE treated as integer PCM");
        }
        other => {
            return Err(AudioError::Container(format!(
                "unsupported encoding tag 0x{:04x}",
                other
            )));
        }
    }
    if header.bits_per_sample != BITS_PER_SAMPLE {
        return Err(AudioError::Container(format!(
            "{}-bit samples (expected {})",
            header.bits_per_sample, BITS_PER_SAMPLE
        )));
    }

    let format = Format::new(header.channels, header.sample_rate).map_err(|e| match e {
        AudioError::UnsupportedFormat(_) => e,
        other => AudioError::Container(other.to_string()),
    })?;

    if header.block_align as usize != format.frame_bytes() {
        warn!(
            block_align = header.block_align,
            expected = format.frame_bytes(),
            "wav: block align disagrees with channel layout"
        );
    }

    let whole = payload.len() - payload.len() % format.frame_bytes();
    if whole != payload.len() {
        warn!(
            trailing = payload.len() - whole,
            "wav: dropping partial frame at end of data"
        );
    }
    let pcm = PcmBuffer::new(format, payload[..whole].to_vec())?;
    Ok((pcm, format))
}

/// Walks the RIFF chunk list and returns the `fmt ` fields and the `data` payload.
fn scan_chunks(blob: &[u8]) -> Result<(Header, &[u8])> {
    let mut pos = 12;
    let mut header: Option<Header> = None;
    let mut payload: Option<&[u8]> = None;

    while pos + 8 <= blob.len() {
        let id = &blob[pos..pos + 4];
        let size = u32::from_le_bytes([blob[pos + 4], blob[pos + 5], blob[pos + 6], blob[pos + 7]]);
        let body_start = pos + 8;
        let remaining = blob.len() - body_start;
        let mut body_len = size as usize;

        if id == FMT {
            if header.is_some() {
                warn!("wav: duplicate fmt chunk ignored");
            } else {
                let body = &blob[body_start..body_start + body_len.min(remaining)];
                header = Some(parse_fmt(body)?);
            }
        } else if id == DATA {
            if body_len > remaining {
                if size != UNKNOWN_LEN {
                    warn!(declared = size, available = remaining, "wav: data chunk truncated");
                }
                body_len = remaining;
            }
            if payload.is_some() {
                warn!("wav: extra data chunk ignored");
            } else {
                if header.is_none() {
                    warn!("wav: data chunk precedes fmt chunk");
                }
                payload = Some(&blob[body_start..body_start + body_len]);
            }
        } else {
            debug!(chunk = %String::from_utf8_lossy(id), size, "wav: skipping chunk");
        }

        if header.is_some() && payload.is_some() {
            break;
        }
        // Chunk bodies are padded to an even length.
        pos = body_start.saturating_add(body_len).saturating_add(body_len & 1);
    }

    match (header, payload) {
        (Some(mut h), Some(p)) => {
            h.data_len = p.len() as u32;
            Ok((h, p))
        }
        (None, _) => Err(AudioError::Container("missing fmt chunk".to_string())),
        (_, None) => Err(AudioError::Container("missing data chunk".to_string())),
    }
}

fn parse_fmt(body: &[u8]) -> Result<Header> {
    let mut f = Fields::new(body);
    let short = || AudioError::Container(format!("fmt chunk too short ({} bytes)", body.len()));
    let audio_format = f.u16().ok_or_else(short)?;
    let channels = f.u16().ok_or_else(short)?;
    let sample_rate = f.u32().ok_or_else(short)?;
    let byte_rate = f.u32().ok_or_else(short)?;
    let block_align = f.u16().ok_or_else(short)?;
    let bits_per_sample = f.u16().ok_or_else(short)?;
    Ok(Header {
        audio_format,
        channels,
        sample_rate,
        byte_rate,
        block_align,
        bits_per_sample,
        data_len: 0,
    })
}

/// Encodes `buffer` as a canonical WAV blob declaring `format`.
///
/// `format` must match the buffer's own format.
pub fn encode(buffer: &PcmBuffer, format: Format) -> Result<Vec<u8>> {
    if buffer.format() != format {
        return Err(AudioError::Format(format!(
            "buffer is {} but {} was requested",
            buffer.format(),
            format
        )));
    }
    let data_len = u32::try_from(buffer.len_bytes())
        .ok()
        .filter(|len| len.checked_add(HEADER_LEN as u32).is_some())
        .ok_or_else(|| {
            AudioError::Container(format!("{} bytes exceeds the RIFF size limit", buffer.len_bytes()))
        })?;

    let mut out = Vec::with_capacity(HEADER_LEN + buffer.len_bytes());
    Header::for_format(format, data_len).write_to(&mut out);
    out.extend_from_slice(buffer.as_bytes());
    Ok(out)
}
