//! Constant-zero source.

use crate::{AudioSignal, Length, Result, Signal, frames_for_duration};

/// Yields `0.0`, either for a fixed number of frames or forever.
///
/// # Examples
///
/// ```
/// use beepstream::{Length, Signal, Silence};
///
/// let gap = Silence::<44100>::new(0.1).unwrap();
/// assert_eq!(gap.length(), Length::Finite(4410));
///
/// let mut forever = Silence::<44100>::forever();
/// assert_eq!(forever.next_sample(), Some(0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Silence<const FRAME_RATE: u32 = { crate::FRAME_RATE }> {
    remaining: Option<usize>,
}

impl<const FRAME_RATE: u32> Silence<FRAME_RATE> {
    /// Silence lasting `round(seconds * FRAME_RATE)` frames.
    pub fn new(seconds: f64) -> Result<Self> {
        Ok(Self::frames(frames_for_duration(seconds, FRAME_RATE)?))
    }

    /// Silence lasting exactly `frames` frames.
    pub fn frames(frames: usize) -> Self {
        Self {
            remaining: Some(frames),
        }
    }

    /// Silence that never ends.
    pub fn forever() -> Self {
        Self { remaining: None }
    }
}

impl<const FRAME_RATE: u32> Signal for Silence<FRAME_RATE> {
    fn next_sample(&mut self) -> Option<f64> {
        match &mut self.remaining {
            None => Some(0.0),
            Some(0) => None,
            Some(n) => {
                *n -= 1;
                Some(0.0)
            }
        }
    }

    fn length(&self) -> Length {
        match self.remaining {
            Some(n) => Length::Finite(n),
            None => Length::Infinite,
        }
    }

    fn process(&mut self, buffer: &mut [f64]) -> usize {
        let count = match &mut self.remaining {
            None => buffer.len(),
            Some(n) => {
                let count = buffer.len().min(*n);
                *n -= count;
                count
            }
        };
        buffer[..count].fill(0.0);
        count
    }
}

impl<const FRAME_RATE: u32> AudioSignal<FRAME_RATE> for Silence<FRAME_RATE> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_fixed_silence_ends() {
        let mut gap = Silence::<44100>::new(0.3).unwrap();
        let mut count = 0;
        while let Some(sample) = gap.next_sample() {
            assert_eq!(sample, 0.0);
            count += 1;
        }
        assert_eq!(count, 13230);
        assert_eq!(gap.next_sample(), None);
    }

    #[test]
    fn test_zero_length_silence() {
        let mut gap = Silence::<44100>::frames(0);
        assert_eq!(gap.length(), Length::Finite(0));
        assert_eq!(gap.next_sample(), None);
    }

    #[test]
    fn test_process_respects_remaining() {
        let mut gap = Silence::<44100>::frames(5);
        let mut buffer = [1.0; 4];
        assert_eq!(gap.process(&mut buffer), 4);
        assert_eq!(buffer, [0.0; 4]);
        assert_eq!(gap.process(&mut buffer), 1);
        assert_eq!(gap.process(&mut buffer), 0);
    }

    #[test]
    fn test_forever() {
        let mut gap = Silence::<44100>::forever();
        let mut buffer = [1.0; 16];
        assert_eq!(gap.process(&mut buffer), 16);
        assert_eq!(gap.length(), Length::Infinite);
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert!(matches!(
            Silence::<44100>::new(-1.0),
            Err(Error::InvalidDuration { .. })
        ));
    }
}
