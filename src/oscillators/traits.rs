//! Core trait definitions for periodic sources.

/// Common interface for sources that replay a fixed, precomputed cycle.
///
/// The cycle length is a whole number of frames, so the pitch actually emitted
/// is `frame_rate / period`, which can differ from the frequency that was
/// asked for.
pub trait Periodic {
    /// Number of frames in one cycle.
    fn period(&self) -> usize;

    /// Frequency the source was created with, in Hz.
    fn requested_frequency(&self) -> f64;

    /// Frequency actually produced, in Hz.
    fn emitted_frequency(&self) -> f64;

    /// Restarts the cycle from its first frame.
    fn reset(&mut self);
}
