//! Sample sources.
//!
//! This module contains the `Periodic` trait and the generators that feed the
//! rest of the pipeline: the table-driven sine `Tone`, its `PhaseLoop`
//! variant, and `Silence`.

mod phase_loop;
mod silence;
mod tone;
mod traits;

pub use phase_loop::PhaseLoop;
pub use silence::Silence;
pub use tone::{MAX_PERIOD_FRAMES, Tone};
pub use traits::Periodic;
