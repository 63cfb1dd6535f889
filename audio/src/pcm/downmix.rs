//! Channel downmixing.

use super::{Format, PcmBuffer};
use crate::error::{AudioError, Result};

/// Converts a buffer to mono.
///
/// Mono input is returned as is. Stereo frames are averaged as
/// `(L + R) / 2` in 32-bit arithmetic with truncation toward zero, which
/// always fits back into 16 bits.
pub fn to_mono(buffer: PcmBuffer) -> Result<PcmBuffer> {
    let format = buffer.format();
    match format.channels() {
        1 => Ok(buffer),
        2 => {
            let mut data = buffer.into_bytes();
            let n = stereo_to_mono(&mut data);
            data.truncate(n);
            PcmBuffer::new(Format::mono(format.sample_rate()), data)
        }
        n => Err(AudioError::UnsupportedFormat(format!(
            "cannot downmix {} channels",
            n
        ))),
    }
}

/// Converts stereo 16-bit samples to mono in-place by averaging L and R channels.
/// Returns the new byte length.
fn stereo_to_mono(buf: &mut [u8]) -> usize {
    let num_frames = buf.len() / 4;
    for i in 0..num_frames {
        let j = i * 4;
        let k = i * 2;
        let l = i16::from_le_bytes([buf[j], buf[j + 1]]);
        let r = i16::from_le_bytes([buf[j + 2], buf[j + 3]]);
        let m = ((l as i32 + r as i32) / 2) as i16;
        let bytes = m.to_le_bytes();
        buf[k] = bytes[0];
        buf[k + 1] = bytes[1];
    }
    num_frames * 2
}
