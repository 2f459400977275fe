//! Morse code keying.
//!
//! Text such as `"... --- ..."` is parsed into a `MorseScript`, which a
//! `MorseKeyer` renders into a lazy `Sequence` of beeps and silences. With
//! the `macros` feature, `morse!` parses the default notation at compile time.
//!
//! # Examples
//!
//! ```
//! use beepstream::morse::{MorseKeyer, Notation};
//! use beepstream::{Length, Signal};
//!
//! let keyer = MorseKeyer::<44100>::default();
//! let sos = keyer.render_text("... --- ...", &Notation::default()).unwrap();
//! assert!(matches!(sos.length(), Length::Finite(_)));
//! ```

mod keyer;
mod script;

pub use keyer::{MorseKeyer, MorseTiming};
pub use script::{MorseScript, Notation, Symbol};
