//! Error types for synthesis, composition and output.

use std::io;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, composing or writing audio.
#[derive(Debug, Error)]
pub enum Error {
    /// Frequency is not positive, or rounds to a period of zero frames.
    #[error("invalid frequency: {frequency} Hz")]
    InvalidFrequency {
        /// The rejected frequency.
        frequency: f64,
    },

    /// Frequency is valid but its cycle is too long to precompute.
    #[error("{frequency} Hz needs a {frames}-frame cycle, longer than the table limit")]
    PeriodTooLong {
        /// The rejected frequency.
        frequency: f64,
        /// Rounded period in frames.
        frames: f64,
    },

    /// Duration is negative or not finite.
    #[error("invalid duration: {seconds} seconds")]
    InvalidDuration {
        /// The rejected duration.
        seconds: f64,
    },

    /// Phase window selects no frames.
    #[error("phase window [{start}, {end}] selects no frames")]
    InvalidPhaseWindow {
        /// Start angle in radians.
        start: f64,
        /// End angle in radians.
        end: f64,
    },

    /// A non-sequence operand was handed to sequence composition.
    #[error("cannot append {found} to a sample sequence")]
    TypeMismatch {
        /// Description of the offending operand.
        found: &'static str,
    },

    /// A symbol other than a dot, dash or gap appeared in Morse notation.
    #[error("unknown signal '{signal}'")]
    UnknownSignal {
        /// The unrecognised symbol.
        signal: String,
    },

    /// Morse notation contained no words.
    #[error("morse script contains no signals")]
    EmptyScript,

    /// PCM or container parameters the writer cannot represent.
    #[error("unsupported format: {message}")]
    UnsupportedFormat {
        /// What was wrong with the format.
        message: String,
    },

    /// The position query on the sink failed with something other than an illegal seek.
    #[error("seekability probe failed: {0}")]
    SeekProbeFailed(#[source] io::Error),

    /// Writing the header or sample data failed.
    #[error("stream write failed: {0}")]
    StreamWriteFailed(#[source] io::Error),

    /// A frame count does not fit the header's size field.
    #[error("{frames} frames do not fit a {field} data-size field")]
    HeaderOverflow {
        /// Frame count that was being packed.
        frames: u64,
        /// Name of the size field layout.
        field: &'static str,
    },

    /// The live output device failed.
    #[error("playback error: {message}")]
    Playback {
        /// Device or stream error text.
        message: String,
    },
}

impl Error {
    /// Creates an unsupported-format error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Creates a playback error.
    pub fn playback(message: impl Into<String>) -> Self {
        Self::Playback {
            message: message.into(),
        }
    }

    /// Stable short code for matching on error kinds.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidFrequency { .. } => "INVALID_FREQUENCY",
            Error::PeriodTooLong { .. } => "PERIOD_TOO_LONG",
            Error::InvalidDuration { .. } => "INVALID_DURATION",
            Error::InvalidPhaseWindow { .. } => "INVALID_PHASE_WINDOW",
            Error::TypeMismatch { .. } => "TYPE_MISMATCH",
            Error::UnknownSignal { .. } => "UNKNOWN_SIGNAL",
            Error::EmptyScript => "EMPTY_SCRIPT",
            Error::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Error::SeekProbeFailed(_) => "SEEK_PROBE_FAILED",
            Error::StreamWriteFailed(_) => "STREAM_WRITE_FAILED",
            Error::HeaderOverflow { .. } => "HEADER_OVERFLOW",
            Error::Playback { .. } => "PLAYBACK",
        }
    }
}
