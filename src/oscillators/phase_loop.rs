//! Looping slice of a tone between two phase angles.

use std::f64::consts::TAU;
use std::sync::Arc;

use super::{Periodic, Tone};
use crate::{AudioSignal, Error, Length, Result, Signal};

/// Replays the frames of a tone lying between two phase angles, forever.
///
/// For a tone at `frequency`, the window covers frames
/// `trunc(FRAME_RATE / frequency * start / 2π)` up to (excluding)
/// `trunc(FRAME_RATE / frequency * end / 2π)` of the cyclic tone. Angles past
/// `2π` keep walking the cycle, so a window can span several periods.
///
/// # Examples
///
/// ```
/// use beepstream::{PhaseLoop, Periodic};
/// use std::f64::consts::PI;
///
/// // First half of each cycle only: a rectified-looking pulse train.
/// let half = PhaseLoop::<44100>::new(441.0, PI).unwrap();
/// assert_eq!(half.period(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseLoop<const FRAME_RATE: u32 = { crate::FRAME_RATE }> {
    requested: f64,
    window: Arc<[f64]>,
    position: usize,
}

impl<const FRAME_RATE: u32> PhaseLoop<FRAME_RATE> {
    /// Loops the tone from phase 0 up to `end` radians.
    pub fn new(frequency: f64, end: f64) -> Result<Self> {
        Self::window(frequency, 0.0, end)
    }

    /// Loops the tone from `start` up to `end` radians.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Pitch of the underlying tone in Hz
    /// * `start` - First phase angle to replay, in radians
    /// * `end` - Phase angle at which the loop wraps back to `start`
    ///
    /// # Returns
    ///
    /// An infinite signal cycling through the selected frames of one period.
    ///
    /// # Errors
    ///
    /// `Error::InvalidFrequency` for an unusable frequency and
    /// `Error::InvalidPhaseWindow` if the angles are negative, not finite,
    /// or select no frames.
    pub fn window(frequency: f64, start: f64, end: f64) -> Result<Self> {
        let tone = Tone::<FRAME_RATE>::new(frequency)?;
        let invalid = || Error::InvalidPhaseWindow { start, end };

        if !start.is_finite() || !end.is_finite() || start < 0.0 || end < 0.0 {
            return Err(invalid());
        }
        let frames_per_cycle = FRAME_RATE as f64 / frequency;
        let first = (frames_per_cycle * (start / TAU)) as usize;
        let last = (frames_per_cycle * (end / TAU)) as usize;
        if first >= last || last > FRAME_RATE as usize * 10 {
            return Err(invalid());
        }

        let cycle = tone.table();
        let window: Arc<[f64]> = (first..last).map(|i| cycle[i % cycle.len()]).collect();

        Ok(Self {
            requested: frequency,
            window,
            position: 0,
        })
    }
}

impl<const FRAME_RATE: u32> Signal for PhaseLoop<FRAME_RATE> {
    fn next_sample(&mut self) -> Option<f64> {
        let sample = self.window[self.position];
        self.position = (self.position + 1) % self.window.len();
        Some(sample)
    }

    fn length(&self) -> Length {
        Length::Infinite
    }
}

impl<const FRAME_RATE: u32> AudioSignal<FRAME_RATE> for PhaseLoop<FRAME_RATE> {}

impl<const FRAME_RATE: u32> Periodic for PhaseLoop<FRAME_RATE> {
    fn period(&self) -> usize {
        self.window.len()
    }

    fn requested_frequency(&self) -> f64 {
        self.requested
    }

    fn emitted_frequency(&self) -> f64 {
        FRAME_RATE as f64 / self.window.len() as f64
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_full_cycle_matches_tone() {
        let mut looped = PhaseLoop::<44100>::new(441.0, TAU).unwrap();
        let mut tone = Tone::<44100>::new(441.0).unwrap();
        assert_eq!(looped.period(), 100);
        for _ in 0..250 {
            assert_eq!(looped.next_sample(), tone.next_sample());
        }
    }

    #[test]
    fn test_window_selects_frames() {
        // 441 Hz -> 100 frames per cycle; [π/2, π] -> frames 25..50
        let mut looped = PhaseLoop::<44100>::window(441.0, PI / 2.0, PI).unwrap();
        let tone = Tone::<44100>::new(441.0).unwrap();
        assert_eq!(looped.period(), 25);
        assert_eq!(looped.next_sample(), Some(tone.table()[25]));
        for _ in 0..24 {
            looped.next_sample();
        }
        // wrapped back to the window start
        assert_eq!(looped.next_sample(), Some(tone.table()[25]));
    }

    #[test]
    fn test_window_past_one_cycle() {
        let looped = PhaseLoop::<44100>::new(441.0, 3.0 * TAU).unwrap();
        assert_eq!(looped.period(), 300);
    }

    #[test]
    fn test_empty_window_rejected() {
        assert!(matches!(
            PhaseLoop::<44100>::window(441.0, PI, PI),
            Err(Error::InvalidPhaseWindow { .. })
        ));
        assert!(PhaseLoop::<44100>::window(441.0, -1.0, PI).is_err());
        assert!(PhaseLoop::<44100>::new(441.0, f64::NAN).is_err());
    }

    #[test]
    fn test_bad_frequency_rejected_first() {
        assert!(matches!(
            PhaseLoop::<44100>::new(0.0, PI),
            Err(Error::InvalidFrequency { .. })
        ));
    }
}
