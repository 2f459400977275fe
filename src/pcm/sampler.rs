//! Float to fixed-width PCM conversion.

use super::FrameSource;
use crate::{Error, Result, Signal};

/// Width of one packed PCM sample.
///
/// Only signed widths are offered; WAV stores 8-bit audio unsigned, which the
/// linear mapping used here does not produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleWidth {
    /// Signed 16-bit, the default.
    #[default]
    Int16,
    /// Signed 24-bit.
    Int24,
    /// Signed 32-bit.
    Int32,
}

impl SampleWidth {
    /// Looks up the width for a byte count.
    pub fn from_bytes(bytes: usize) -> Result<Self> {
        match bytes {
            2 => Ok(SampleWidth::Int16),
            3 => Ok(SampleWidth::Int24),
            4 => Ok(SampleWidth::Int32),
            other => Err(Error::unsupported(format!(
                "sample width of {other} bytes (expected 2, 3 or 4)"
            ))),
        }
    }

    /// Bytes per sample.
    pub fn bytes(self) -> usize {
        match self {
            SampleWidth::Int16 => 2,
            SampleWidth::Int24 => 3,
            SampleWidth::Int32 => 4,
        }
    }

    /// Bits per sample.
    pub fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }
}

/// One packed little-endian PCM sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmWord {
    bytes: [u8; 4],
    len: u8,
}

impl PcmWord {
    /// The packed bytes, least significant first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// Maps floating point samples onto signed integers of a fixed width.
///
/// With `bits = 8 * width`, a sample `x` in `[min, max]` becomes
/// `round((x - min) * scale) - 2^(bits - 1)` where
/// `scale = (2^bits - 1) / (max - min)`. The integer is packed little-endian
/// by keeping its low `width` bytes, so samples outside `[min, max]` wrap
/// around rather than clip.
///
/// # Examples
///
/// ```
/// use beepstream::Sampler;
///
/// let sampler = Sampler::default();
/// assert_eq!(sampler.code(0.0), 0);
/// assert_eq!(sampler.code(-1.0), -32768);
/// assert_eq!(sampler.code(1.0), 32767);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    min: f64,
    max: f64,
    width: SampleWidth,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SampleWidth::default())
    }
}

impl Sampler {
    /// A sampler for input in [-1, 1].
    pub fn new(width: SampleWidth) -> Self {
        Self {
            min: -1.0,
            max: 1.0,
            width,
        }
    }

    /// Changes the declared input range.
    ///
    /// # Arguments
    ///
    /// * `min` - Input value mapped to the lowest integer code
    /// * `max` - Input value mapped to the highest integer code
    ///
    /// # Returns
    ///
    /// The sampler with the same width and the new mapping.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedFormat` unless `min < max` and both are finite.
    pub fn with_range(self, min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::unsupported(format!(
                "sampler input range [{min}, {max}]"
            )));
        }
        Ok(Self { min, max, ..self })
    }

    /// Output width.
    pub fn width(&self) -> SampleWidth {
        self.width
    }

    /// Integer steps per unit of input.
    pub fn scale(&self) -> f64 {
        ((1u64 << self.width.bits()) - 1) as f64 / (self.max - self.min)
    }

    /// The integer code for `sample`, before any wrapping.
    pub fn code(&self, sample: f64) -> i64 {
        let offset = 1i64 << (self.width.bits() - 1);
        ((sample - self.min) * self.scale()).round() as i64 - offset
    }

    /// Packs `sample` into a word, wrapping codes that do not fit.
    pub fn word(&self, sample: f64) -> PcmWord {
        let mut bytes = [0u8; 4];
        let len = self.width.bytes();
        bytes[..len].copy_from_slice(&self.code(sample).to_le_bytes()[..len]);
        PcmWord {
            bytes,
            len: len as u8,
        }
    }

    /// Lazily converts a signal into packed words.
    pub fn pcm<S: Signal>(self, source: S) -> Pcm<S> {
        Pcm {
            source,
            sampler: self,
        }
    }
}

/// A stream of packed PCM words for one channel.
///
/// Produced by `Sampler::pcm`. As a `FrameSource` it is a single-channel
/// frame stream.
pub struct Pcm<S: Signal> {
    source: S,
    sampler: Sampler,
}

impl<S: Signal> Pcm<S> {
    /// The sampler doing the conversion.
    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }
}

impl<S: Signal> Iterator for Pcm<S> {
    type Item = PcmWord;

    fn next(&mut self) -> Option<PcmWord> {
        self.source
            .next_sample()
            .map(|sample| self.sampler.word(sample))
    }
}

impl<S: Signal> FrameSource for Pcm<S> {
    fn frame_size(&self) -> usize {
        self.sampler.width.bytes()
    }

    fn next_frame(&mut self, out: &mut Vec<u8>) -> bool {
        match self.next() {
            Some(word) => {
                out.extend_from_slice(word.as_bytes());
                true
            }
            None => false,
        }
    }
}
