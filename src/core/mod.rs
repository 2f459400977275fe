//! Core signal types and traits.
//!
//! This module provides the abstractions every other stage builds on:
//! - `Signal` for lazily produced sample sequences, finite or infinite
//! - `Length` for describing how much of a signal remains
//! - `AudioSignal` for frame-rate-aware signals
//! - `BufferedSignal` for replaying in-memory samples
//! - `Samples` for using a signal as a standard iterator

mod audio;
mod signal;

pub use audio::{AudioSignal, frames_for_duration};
pub use signal::{BufferedSignal, Length, Samples, Signal};
