//! RIFF/WAVE header structures.
//!
//! Canonical layout written by [`Header::write_to`]:
//! ```text
//!  0  "RIFF"  u32 riff_len  "WAVE"
//! 12  "fmt "  u32 16  u16 format  u16 channels  u32 rate  u32 byte_rate
//!             u16 block_align  u16 bits
//! 36  "data"  u32 data_len
//! 44  PCM payload
//! ```

use crate::pcm::{BITS_PER_SAMPLE, Format};

/// Length of the canonical header, and the smallest blob `decode` accepts.
pub const HEADER_LEN: usize = 44;

pub(crate) const RIFF: &[u8; 4] = b"RIFF";
pub(crate) const WAVE: &[u8; 4] = b"WAVE";
pub(crate) const FMT: &[u8; 4] = b"fmt ";
pub(crate) const DATA: &[u8; 4] = b"data";

/// Size of the PCM `fmt ` chunk body.
pub(crate) const FMT_LEN: u32 = 16;

/// Integer PCM format tag.
pub const FORMAT_PCM: u16 = 0x0001;
/// WAVE_FORMAT_EXTENSIBLE; the sub-format follows the basic fields.
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Fields of the `fmt ` chunk plus the `data` chunk length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

impl Header {
    /// Builds the header describing `data_len` bytes of PCM in `format`.
    pub fn for_format(format: Format, data_len: u32) -> Self {
        Self {
            audio_format: FORMAT_PCM,
            channels: format.channels(),
            sample_rate: format.sample_rate(),
            byte_rate: format.bytes_rate() as u32,
            block_align: format.frame_bytes() as u16,
            bits_per_sample: BITS_PER_SAMPLE,
            data_len,
        }
    }

    /// Appends the canonical 44-byte header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let riff_len = (HEADER_LEN as u32 - 8).saturating_add(self.data_len);
        out.extend_from_slice(RIFF);
        out.extend_from_slice(&riff_len.to_le_bytes());
        out.extend_from_slice(WAVE);
        out.extend_from_slice(FMT);
        out.extend_from_slice(&FMT_LEN.to_le_bytes());
        out.extend_from_slice(&self.audio_format.to_le_bytes());
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&self.byte_rate.to_le_bytes());
        out.extend_from_slice(&self.block_align.to_le_bytes());
        out.extend_from_slice(&self.bits_per_sample.to_le_bytes());
        out.extend_from_slice(DATA);
        out.extend_from_slice(&self.data_len.to_le_bytes());
    }
}

/// Little-endian field reader over a byte slice.
pub(crate) struct Fields<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Fields<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn u16(&mut self) -> Option<u16> {
        let b = self.buf.get(self.pos..self.pos + 2)?;
        self.pos += 2;
        Some(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Option<u32> {
        let b = self.buf.get(self.pos..self.pos + 4)?;
        self.pos += 4;
        Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let mut out = Vec::new();
        Header::for_format(Format::MONO_44K, 8).write_to(&mut out);
        assert_eq!(out.len(), HEADER_LEN);
        assert_eq!(&out[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([out[4], out[5], out[6], out[7]]), 44);
        assert_eq!(&out[8..16], b"WAVEfmt ");
        assert_eq!(u32::from_le_bytes([out[16], out[17], out[18], out[19]]), 16);
        assert_eq!(u16::from_le_bytes([out[20], out[21]]), FORMAT_PCM);
        assert_eq!(u16::from_le_bytes([out[22], out[23]]), 1);
        assert_eq!(u32::from_le_bytes([out[24], out[25], out[26], out[27]]), 44100);
        assert_eq!(u32::from_le_bytes([out[28], out[29], out[30], out[31]]), 88200);
        assert_eq!(u16::from_le_bytes([out[32], out[33]]), 2);
        assert_eq!(u16::from_le_bytes([out[34], out[35]]), 16);
        assert_eq!(&out[36..40], b"data");
        assert_eq!(u32::from_le_bytes([out[40], out[41], out[42], out[43]]), 8);
    }

    #[test]
    fn test_stereo_header_fields() {
        let h = Header::for_format(Format::STEREO_48K, 0);
        assert_eq!(h.channels, 2);
        assert_eq!(h.block_align, 4);
        assert_eq!(h.byte_rate, 192000);
    }

    #[test]
    fn test_fields_reader() {
        let mut f = Fields::new(&[0x01, 0x00, 0x44, 0xac, 0x00, 0x00, 0xff]);
        assert_eq!(f.u16(), Some(1));
        assert_eq!(f.u32(), Some(44100));
        assert_eq!(f.u16(), None);
    }
}
