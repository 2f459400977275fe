//! WAV container parameters.

use crate::pcm::SampleWidth;
use crate::{Error, Result};

/// Format tag for uncompressed integer PCM.
pub const PCM_FORMAT_TAG: u16 = 1;

/// Parameters of a PCM WAV container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    channels: u16,
    frame_rate: u32,
    width: SampleWidth,
}

impl WavFormat {
    /// Creates a format.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedFormat` for zero channels or a zero frame
    /// rate, or when the block size or byte rate does not fit the header.
    pub fn new(channels: u16, frame_rate: u32, width: SampleWidth) -> Result<Self> {
        if channels == 0 {
            return Err(Error::unsupported("a WAV stream needs at least one channel"));
        }
        if frame_rate == 0 {
            return Err(Error::unsupported("frame rate must be positive"));
        }
        let block_align = channels as u64 * width.bytes() as u64;
        if block_align > u16::MAX as u64 {
            return Err(Error::unsupported(format!(
                "{channels} channels of {} bytes exceed the block size limit",
                width.bytes()
            )));
        }
        let byte_rate = frame_rate as u64 * block_align;
        if byte_rate > u32::MAX as u64 {
            return Err(Error::unsupported(format!(
                "byte rate {byte_rate} does not fit the header"
            )));
        }
        Ok(Self {
            channels,
            frame_rate,
            width,
        })
    }

    /// Mono 16-bit at the crate frame rate.
    pub fn mono() -> Self {
        Self {
            channels: 1,
            frame_rate: crate::FRAME_RATE,
            width: SampleWidth::Int16,
        }
    }

    /// Stereo 16-bit at the crate frame rate.
    pub fn stereo() -> Self {
        Self {
            channels: 2,
            ..Self::mono()
        }
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Frames per second.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Width of one sample.
    pub fn width(&self) -> SampleWidth {
        self.width
    }

    /// Bits per sample as stored in the `fmt ` chunk.
    pub fn bits_per_sample(&self) -> u16 {
        self.width.bits() as u16
    }

    /// Bytes per frame (channels * sample width).
    pub fn block_align(&self) -> u16 {
        self.channels * self.width.bytes() as u16
    }

    /// Bytes per second (frame rate * block align).
    pub fn byte_rate(&self) -> u32 {
        self.frame_rate * self.block_align() as u32
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::mono()
    }
}
