//! Rendering Morse scripts as audio.

use super::script::{MorseScript, Notation, Symbol};
use crate::{Error, Result, Sequence};

/// Tone and durations used when keying Morse code.
///
/// Element and gap lengths are multiples of `unit` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorseTiming {
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Length of one unit in seconds.
    pub unit: f64,
    /// Units per dot.
    pub dot_units: f64,
    /// Units per dash.
    pub dash_units: f64,
    /// Units of silence between the symbols of a letter.
    pub signal_gap_units: f64,
    /// Units of silence between letters.
    pub letter_gap_units: f64,
    /// Units of silence between words.
    pub word_gap_units: f64,
}

impl Default for MorseTiming {
    fn default() -> Self {
        Self {
            frequency: 880.0,
            unit: 0.1,
            dot_units: 1.0,
            dash_units: 3.0,
            signal_gap_units: 1.0,
            letter_gap_units: 3.0,
            word_gap_units: 7.0,
        }
    }
}

impl MorseTiming {
    /// Keys at `frequency` Hz.
    pub fn with_frequency(self, frequency: f64) -> Self {
        Self { frequency, ..self }
    }

    /// Uses a unit of `unit` seconds.
    pub fn with_unit(self, unit: f64) -> Self {
        Self { unit, ..self }
    }

    /// Seconds per dot.
    pub fn dot_seconds(&self) -> f64 {
        self.dot_units * self.unit
    }

    /// Seconds per dash.
    pub fn dash_seconds(&self) -> f64 {
        self.dash_units * self.unit
    }
}

/// Turns Morse scripts into sample sequences.
///
/// A letter is its symbols separated by signal gaps, a word its letters
/// separated by letter gaps, a message its words separated by word gaps.
///
/// # Examples
///
/// ```
/// use beepstream::morse::{MorseKeyer, MorseScript, Notation};
/// use beepstream::{Length, Signal};
///
/// let keyer = MorseKeyer::<44100>::default();
/// let e = MorseScript::parse(".", &Notation::default()).unwrap();
/// assert_eq!(keyer.render(&e).unwrap().length(), Length::Finite(4410));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MorseKeyer<const FRAME_RATE: u32 = { crate::FRAME_RATE }> {
    timing: MorseTiming,
}

impl<const FRAME_RATE: u32> MorseKeyer<FRAME_RATE> {
    /// Creates a keyer with the given timing.
    pub fn new(timing: MorseTiming) -> Self {
        Self { timing }
    }

    /// The keyer's timing.
    pub fn timing(&self) -> &MorseTiming {
        &self.timing
    }

    /// A single dot.
    pub fn dot(&self) -> Result<Sequence<FRAME_RATE>> {
        Sequence::beep(self.timing.frequency, self.timing.dot_seconds())
    }

    /// A single dash.
    pub fn dash(&self) -> Result<Sequence<FRAME_RATE>> {
        Sequence::beep(self.timing.frequency, self.timing.dash_seconds())
    }

    /// Silence between symbols of a letter.
    pub fn signal_gap(&self) -> Result<Sequence<FRAME_RATE>> {
        self.gap(self.timing.signal_gap_units)
    }

    /// Silence between letters.
    pub fn letter_gap(&self) -> Result<Sequence<FRAME_RATE>> {
        self.gap(self.timing.letter_gap_units)
    }

    /// Silence between words.
    pub fn word_gap(&self) -> Result<Sequence<FRAME_RATE>> {
        self.gap(self.timing.word_gap_units)
    }

    fn gap(&self, units: f64) -> Result<Sequence<FRAME_RATE>> {
        Sequence::silence(units * self.timing.unit)
    }

    /// Audio for one symbol.
    pub fn symbol(&self, symbol: Symbol) -> Result<Sequence<FRAME_RATE>> {
        match symbol {
            Symbol::Dot => self.dot(),
            Symbol::Dash => self.dash(),
        }
    }

    /// Audio for a single written signal.
    ///
    /// An empty signal is one signal gap; otherwise `signal` must be exactly
    /// the dot or dash sign of `notation`.
    pub fn signal(&self, signal: &str, notation: &Notation) -> Result<Sequence<FRAME_RATE>> {
        let mut signs = signal.chars();
        match (signs.next(), signs.next()) {
            (None, _) => self.signal_gap(),
            (Some(sign), None) => match notation.symbol(sign) {
                Some(symbol) => self.symbol(symbol),
                None => Err(unknown(signal)),
            },
            _ => Err(unknown(signal)),
        }
    }

    /// Renders a whole message.
    pub fn render(&self, script: &MorseScript) -> Result<Sequence<FRAME_RATE>> {
        let words = script
            .words()
            .iter()
            .map(|word| {
                let letters = word
                    .iter()
                    .map(|letter| {
                        let symbols = letter
                            .iter()
                            .map(|&symbol| self.symbol(symbol))
                            .collect::<Result<Vec<_>>>()?;
                        Sequence::join_with(symbols, || self.signal_gap())
                    })
                    .collect::<Result<Vec<_>>>()?;
                Sequence::join_with(letters, || self.letter_gap())
            })
            .collect::<Result<Vec<_>>>()?;
        Sequence::join_with(words, || self.word_gap())
    }

    /// Parses `text` in `notation` and renders it.
    pub fn render_text(&self, text: &str, notation: &Notation) -> Result<Sequence<FRAME_RATE>> {
        self.render(&MorseScript::parse(text, notation)?)
    }
}

fn unknown(signal: &str) -> Error {
    Error::UnknownSignal {
        signal: signal.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Length, Signal, SignalExt};

    fn keyer() -> MorseKeyer<1000> {
        MorseKeyer::new(MorseTiming::default().with_frequency(100.0).with_unit(0.01))
    }

    fn frames(sequence: Sequence<1000>) -> usize {
        match sequence.length() {
            Length::Finite(frames) => frames,
            Length::Infinite => panic!("keyed audio must be finite"),
        }
    }

    #[test]
    fn test_element_lengths() {
        let keyer = keyer();
        assert_eq!(frames(keyer.dot().unwrap()), 10);
        assert_eq!(frames(keyer.dash().unwrap()), 30);
        assert_eq!(frames(keyer.signal_gap().unwrap()), 10);
        assert_eq!(frames(keyer.letter_gap().unwrap()), 30);
        assert_eq!(frames(keyer.word_gap().unwrap()), 70);
    }

    #[test]
    fn test_sos_length() {
        // S = 3 dots + 2 gaps = 50, O = 3 dashes + 2 gaps = 110, two letter gaps = 60.
        let sos = keyer()
            .render_text("... --- ...", &Notation::default())
            .unwrap();
        assert_eq!(frames(sos), 50 + 30 + 110 + 30 + 50);
    }

    #[test]
    fn test_words_are_separated_by_word_gaps() {
        let two = keyer().render_text(". / .", &Notation::default()).unwrap();
        assert_eq!(frames(two), 10 + 70 + 10);
    }

    #[test]
    fn test_rendered_gaps_are_silent() {
        let samples: Vec<f64> = keyer()
            .render_text("..", &Notation::default())
            .unwrap()
            .samples()
            .collect();
        assert_eq!(samples.len(), 30);
        assert!(samples[10..20].iter().all(|&s| s == 0.0));
        assert!(samples[..10].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_single_signal() {
        let keyer = keyer();
        let notation = Notation::default();
        assert_eq!(frames(keyer.signal("", &notation).unwrap()), 10);
        assert_eq!(frames(keyer.signal(".", &notation).unwrap()), 10);
        assert_eq!(frames(keyer.signal("-", &notation).unwrap()), 30);
        assert!(matches!(
            keyer.signal("..", &notation),
            Err(Error::UnknownSignal { .. })
        ));
        assert!(keyer.signal("?", &notation).is_err());
    }

    #[test]
    fn test_bad_frequency_surfaces_on_render() {
        let keyer = MorseKeyer::<1000>::new(MorseTiming::default().with_frequency(-1.0));
        let script = MorseScript::parse(".", &Notation::default()).unwrap();
        assert_eq!(keyer.render(&script).unwrap_err().code(), "INVALID_FREQUENCY");
    }
}
