//! Beepstream - lazy tone synthesis and streaming WAV output
//!
//! Signals are pulled one sample at a time, so sequences can be arbitrarily
//! long or infinite. A typical pipeline is tone → sequence → sampler →
//! interleaver → chunks → WAV writer or playback device.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use beepstream::Sequence;
//! use beepstream::wav::{Sink, WavOptions, write_wav};
//!
//! let melody = Sequence::<44100>::beep(440.0, 0.25)?
//!     .then(Sequence::silence(0.1)?)
//!     .then(Sequence::beep(660.0, 0.25)?);
//!
//! let sink = Sink::probe(Cursor::new(Vec::new()))?;
//! let (_, summary) = write_wav(sink, vec![melody], &WavOptions::default())?;
//! assert_eq!(summary.frames_written, 11025 + 4410 + 11025);
//! # Ok::<(), beepstream::Error>(())
//! ```

pub mod combinators;
pub mod composer;
pub mod core;
pub mod error;
pub mod morse;
pub mod oscillators;
pub mod pcm;
pub mod playback;
pub mod wav;

/// Frames per second used when a type does not name its own frame rate.
pub const FRAME_RATE: u32 = 44100;

/// Default bytes per PCM sample.
pub const SAMPLE_WIDTH: usize = 2;

/// Frames per chunk when writing WAV data.
pub const DEFAULT_CHUNK_FRAMES: usize = 100_000;

/// Frames per chunk when writing to a playback device.
pub const PLAYBACK_CHUNK_FRAMES: usize = 1024;

// Re-export commonly used types at the crate root
pub use combinators::{AudioSignalExt, Chain, Crop, SignalExt};
pub use composer::{Operand, Sequence};
pub use self::core::{AudioSignal, BufferedSignal, Length, Samples, Signal, frames_for_duration};
pub use error::{Error, Result};
pub use oscillators::{Periodic, PhaseLoop, Silence, Tone};
pub use pcm::{Chunks, FrameSource, Interleave, Pcm, PcmWord, RawFrames, SampleWidth, Sampler};

#[cfg(feature = "macros")]
pub use beepstream_macros::morse;
