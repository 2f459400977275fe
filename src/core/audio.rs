//! Frame-rate-aware signals.

use crate::{Error, Length, Result, Signal};

/// A signal whose samples are meant to be played at a fixed frame rate.
///
/// The frame rate is a const generic parameter, so signals produced for
/// different rates are different types and cannot be concatenated or
/// interleaved by accident.
///
/// # Examples
///
/// ```
/// use beepstream::{AudioSignal, Tone};
///
/// let tone = Tone::<44100>::new(440.0).unwrap();
/// assert_eq!(tone.frame_rate(), 44100);
/// ```
pub trait AudioSignal<const FRAME_RATE: u32>: Signal {
    /// Frames per second this signal is generated for.
    fn frame_rate(&self) -> u32 {
        FRAME_RATE
    }

    /// Remaining play time in seconds, or `None` if the signal never ends.
    fn remaining_seconds(&self) -> Option<f64> {
        match self.length() {
            Length::Finite(frames) => Some(frames as f64 / FRAME_RATE as f64),
            Length::Infinite => None,
        }
    }
}

impl<const FRAME_RATE: u32, S: AudioSignal<FRAME_RATE> + ?Sized> AudioSignal<FRAME_RATE>
    for Box<S>
{
}

/// Converts a duration into a frame count: `round(seconds * frame_rate)`.
///
/// Negative, NaN and infinite durations are rejected.
pub fn frames_for_duration(seconds: f64, frame_rate: u32) -> Result<usize> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::InvalidDuration { seconds });
    }
    Ok((seconds * frame_rate as f64).round() as usize)
}
