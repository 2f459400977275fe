//! Parsed Morse notation.

use std::fmt;

use crate::{Error, Result};

/// A keyed Morse element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Short element.
    Dot,
    /// Long element.
    Dash,
}

/// Characters used to write Morse code as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notation {
    /// Marks a dot.
    pub dot: char,
    /// Marks a dash.
    pub dash: char,
    /// Separates letters within a word.
    pub letter_delimiter: char,
    /// Separates words.
    pub word_delimiter: char,
}

impl Default for Notation {
    fn default() -> Self {
        Self {
            dot: '.',
            dash: '-',
            letter_delimiter: ' ',
            word_delimiter: '/',
        }
    }
}

impl Notation {
    /// Uses `dot` and `dash` as the element characters.
    pub fn with_signs(self, dot: char, dash: char) -> Self {
        Self { dot, dash, ..self }
    }

    /// Uses the given letter and word delimiters.
    pub fn with_delimiters(self, letter_delimiter: char, word_delimiter: char) -> Self {
        Self {
            letter_delimiter,
            word_delimiter,
            ..self
        }
    }

    /// The symbol written as `sign`, if any.
    pub fn symbol(&self, sign: char) -> Option<Symbol> {
        if sign == self.dot {
            Some(Symbol::Dot)
        } else if sign == self.dash {
            Some(Symbol::Dash)
        } else {
            None
        }
    }

    /// The character that writes `symbol`.
    pub fn sign(&self, symbol: Symbol) -> char {
        match symbol {
            Symbol::Dot => self.dot,
            Symbol::Dash => self.dash,
        }
    }
}

/// A Morse message as words of letters of symbols.
///
/// Every word has at least one letter and every letter at least one symbol.
///
/// # Examples
///
/// ```
/// use beepstream::morse::{MorseScript, Notation, Symbol};
///
/// let sos = MorseScript::parse("... --- ...", &Notation::default()).unwrap();
/// assert_eq!(sos.words().len(), 1);
/// assert_eq!(sos.words()[0][1], vec![Symbol::Dash; 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorseScript {
    words: Vec<Vec<Vec<Symbol>>>,
}

impl MorseScript {
    /// Parses text written in `notation`.
    ///
    /// Words are split on the word delimiter and letters on the letter
    /// delimiter; surrounding whitespace and empty pieces are ignored.
    ///
    /// # Errors
    ///
    /// `Error::UnknownSignal` for a character that is neither a dot nor a
    /// dash, and `Error::EmptyScript` if no words remain.
    pub fn parse(text: &str, notation: &Notation) -> Result<Self> {
        let mut words = Vec::new();
        for word in non_empty(text, notation.word_delimiter) {
            let mut letters = Vec::new();
            for letter in non_empty(word, notation.letter_delimiter) {
                let symbols = letter
                    .chars()
                    .map(|sign| {
                        notation.symbol(sign).ok_or_else(|| Error::UnknownSignal {
                            signal: sign.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                letters.push(symbols);
            }
            if !letters.is_empty() {
                words.push(letters);
            }
        }
        if words.is_empty() {
            return Err(Error::EmptyScript);
        }
        Ok(Self { words })
    }

    /// Builds a script from nested symbol slices, dropping empty letters and
    /// words.
    ///
    /// This is what the `morse!` macro expands to.
    pub fn from_symbols(words: &[&[&[Symbol]]]) -> Self {
        let words = words
            .iter()
            .map(|word| {
                word.iter()
                    .filter(|letter| !letter.is_empty())
                    .map(|letter| letter.to_vec())
                    .collect::<Vec<_>>()
            })
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    /// Words, each a list of letters.
    pub fn words(&self) -> &[Vec<Vec<Symbol>>] {
        &self.words
    }

    /// Number of symbols in the whole message.
    pub fn symbol_count(&self) -> usize {
        self.words.iter().flatten().map(Vec::len).sum()
    }

    /// Writes the script back as text in `notation`, with single delimiters.
    pub fn to_notation(&self, notation: &Notation) -> String {
        let mut text = String::new();
        for (w, word) in self.words.iter().enumerate() {
            if w > 0 {
                text.push(notation.word_delimiter);
            }
            for (l, letter) in word.iter().enumerate() {
                if l > 0 {
                    text.push(notation.letter_delimiter);
                }
                text.extend(letter.iter().map(|&symbol| notation.sign(symbol)));
            }
        }
        text
    }
}

impl fmt::Display for MorseScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation(&Notation::default()))
    }
}

fn non_empty(text: &str, delimiter: char) -> impl Iterator<Item = &str> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}
