//! Fixed-period sine tone.

use std::f64::consts::TAU;
use std::sync::Arc;

use super::Periodic;
use crate::{AudioSignal, Error, Length, Result, Signal};

/// Longest cycle a tone may precompute: 2^24 frames, 128 MiB of `f64`.
pub const MAX_PERIOD_FRAMES: usize = 1 << 24;

/// An infinite sine tone replayed from a one-period table.
///
/// The period is `round(FRAME_RATE / frequency)` frames and the table holds
/// `sin(i * 2π / period)` for each frame of it. The table is then walked
/// cyclically forever. Because the period is a whole number of frames, the
/// emitted pitch is quantised to `FRAME_RATE / period` and there is a small
/// phase jump at every wrap; both are intended.
///
/// Cloning a tone shares its table and keeps its position.
///
/// # Type Parameters
///
/// * `FRAME_RATE` - Frames per second (defaults to 44100)
///
/// # Examples
///
/// ```
/// use beepstream::{Periodic, Signal, Tone};
///
/// let mut tone = Tone::<44100>::new(440.0).unwrap();
/// assert_eq!(tone.period(), 100);
/// assert_eq!(tone.emitted_frequency(), 441.0);
/// assert_eq!(tone.next_sample(), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct Tone<const FRAME_RATE: u32 = { crate::FRAME_RATE }> {
    requested: f64,
    table: Arc<[f64]>,
    position: usize,
}

impl<const FRAME_RATE: u32> Tone<FRAME_RATE> {
    /// Creates a tone for `frequency` Hz.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Requested pitch in Hz; the emitted pitch is
    ///   `FRAME_RATE / round(FRAME_RATE / frequency)`
    ///
    /// # Returns
    ///
    /// An infinite tone positioned at phase zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidFrequency` if the frequency is not a positive
    /// finite number or rounds to a zero-frame period, and
    /// `Error::PeriodTooLong` if its cycle exceeds `MAX_PERIOD_FRAMES`.
    pub fn new(frequency: f64) -> Result<Self> {
        let period = period_frames(frequency, FRAME_RATE)?;
        let step = TAU / period as f64;
        let table: Arc<[f64]> = (0..period).map(|i| (i as f64 * step).sin()).collect();

        log::debug!(
            "tone {} Hz: period {} frames, emitting {:.3} Hz",
            frequency,
            period,
            FRAME_RATE as f64 / period as f64
        );

        Ok(Self {
            requested: frequency,
            table,
            position: 0,
        })
    }

    /// The precomputed cycle.
    pub fn table(&self) -> &[f64] {
        &self.table
    }
}

/// Computes `round(frame_rate / frequency)`, rejecting degenerate periods.
pub(crate) fn period_frames(frequency: f64, frame_rate: u32) -> Result<usize> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(Error::InvalidFrequency { frequency });
    }
    let period = (frame_rate as f64 / frequency).round();
    if period < 1.0 {
        return Err(Error::InvalidFrequency { frequency });
    }
    if period > MAX_PERIOD_FRAMES as f64 {
        return Err(Error::PeriodTooLong {
            frequency,
            frames: period,
        });
    }
    Ok(period as usize)
}

impl<const FRAME_RATE: u32> Signal for Tone<FRAME_RATE> {
    fn next_sample(&mut self) -> Option<f64> {
        let sample = self.table[self.position];
        self.position += 1;
        if self.position == self.table.len() {
            self.position = 0;
        }
        Some(sample)
    }

    fn length(&self) -> Length {
        Length::Infinite
    }
}

impl<const FRAME_RATE: u32> AudioSignal<FRAME_RATE> for Tone<FRAME_RATE> {}

impl<const FRAME_RATE: u32> Periodic for Tone<FRAME_RATE> {
    fn period(&self) -> usize {
        self.table.len()
    }

    fn requested_frequency(&self) -> f64 {
        self.requested
    }

    fn emitted_frequency(&self) -> f64 {
        FRAME_RATE as f64 / self.table.len() as f64
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
