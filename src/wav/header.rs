//! RIFF/WAVE header packing.

use super::format::{PCM_FORMAT_TAG, WavFormat};
use crate::{Error, Result};

/// Bytes in a canonical PCM WAV header.
pub const HEADER_LEN: usize = 44;

/// Header bytes counted by the RIFF size field ("WAVE" + fmt chunk + data chunk header).
const RIFF_OVERHEAD: u64 = HEADER_LEN as u64 - 8;

/// Width of the RIFF and data size fields a header writer can emit.
///
/// The format defines both fields as unsigned 32-bit, but many writers store
/// them through a signed integer and can only represent 31 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeField {
    /// Full unsigned 32-bit sizes.
    #[default]
    Unsigned32,
    /// Sizes limited to `i32::MAX`.
    Signed31,
}

impl SizeField {
    /// Largest value the field can hold.
    pub fn limit(self) -> u64 {
        match self {
            SizeField::Unsigned32 => u32::MAX as u64,
            SizeField::Signed31 => i32::MAX as u64,
        }
    }

    /// Human-readable name of the layout.
    pub fn name(self) -> &'static str {
        match self {
            SizeField::Unsigned32 => "unsigned 32-bit",
            SizeField::Signed31 => "signed 31-bit",
        }
    }

    /// Largest data chunk size, in bytes, whose RIFF size still fits.
    ///
    /// One byte is reserved for the pad that follows an odd-sized data chunk.
    pub fn max_data_bytes(self) -> u64 {
        self.limit() - RIFF_OVERHEAD - 1
    }
}

/// Largest whole frame count a header can declare for `format`.
pub fn ceiling_frames(format: &WavFormat, field: SizeField) -> u64 {
    field.max_data_bytes() / format.block_align() as u64
}

/// Packs a header declaring `data_bytes` of sample data.
///
/// The RIFF size includes the pad byte of an odd-sized data chunk.
///
/// # Errors
///
/// Returns `Error::HeaderOverflow` if the sizes do not fit `field`.
pub fn pack_header(
    format: &WavFormat,
    data_bytes: u64,
    field: SizeField,
) -> Result<[u8; HEADER_LEN]> {
    if data_bytes > field.max_data_bytes() {
        return Err(Error::HeaderOverflow {
            frames: data_bytes / format.block_align() as u64,
            field: field.name(),
        });
    }
    let riff_size = RIFF_OVERHEAD + data_bytes + (data_bytes & 1);

    let mut header = [0u8; HEADER_LEN];
    let mut at = 0;
    let mut put = |bytes: &[u8]| {
        header[at..at + bytes.len()].copy_from_slice(bytes);
        at += bytes.len();
    };

    // RIFF header
    put(b"RIFF");
    put(&(riff_size as u32).to_le_bytes());
    put(b"WAVE");

    // fmt chunk
    put(b"fmt ");
    put(&16u32.to_le_bytes());
    put(&PCM_FORMAT_TAG.to_le_bytes());
    put(&format.channels().to_le_bytes());
    put(&format.frame_rate().to_le_bytes());
    put(&format.byte_rate().to_le_bytes());
    put(&format.block_align().to_le_bytes());
    put(&format.bits_per_sample().to_le_bytes());

    // data chunk
    put(b"data");
    put(&(data_bytes as u32).to_le_bytes());

    Ok(header)
}
