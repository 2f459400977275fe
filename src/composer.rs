//! Type-erased sequence composition.
//!
//! `Sequence` is the dynamic counterpart of `Chain`: it owns any number of
//! boxed signals and plays them back to back. It is what the Morse keyer and
//! other runtime builders assemble, since the shape of their output is only
//! known at run time.

use std::collections::VecDeque;
use std::fmt;

use crate::{AudioSignal, AudioSignalExt, Error, Length, Result, Signal, Silence, Tone};

/// Something offered to `Sequence::append`.
///
/// Only `Operand::Sequence` can be appended; every other variant is a
/// composition error.
pub enum Operand<const FRAME_RATE: u32 = { crate::FRAME_RATE }> {
    /// A sample sequence.
    Sequence(Sequence<FRAME_RATE>),
    /// A bare sample value, which is not a sequence.
    Sample(f64),
}

impl<const FRAME_RATE: u32> Operand<FRAME_RATE> {
    fn describe(&self) -> &'static str {
        match self {
            Operand::Sequence(_) => "a sequence",
            Operand::Sample(_) => "a bare sample value",
        }
    }
}

impl<const FRAME_RATE: u32> From<Sequence<FRAME_RATE>> for Operand<FRAME_RATE> {
    fn from(sequence: Sequence<FRAME_RATE>) -> Self {
        Operand::Sequence(sequence)
    }
}

impl<const FRAME_RATE: u32> From<f64> for Operand<FRAME_RATE> {
    fn from(sample: f64) -> Self {
        Operand::Sample(sample)
    }
}

/// An ordered, lazily played concatenation of signals.
///
/// The empty sequence is the identity of concatenation: appending it changes
/// nothing, and appending anything to it yields that operand unchanged.
/// Concatenation is associative and never evaluates an operand early.
///
/// # Examples
///
/// ```
/// use beepstream::{Length, Sequence, Signal};
///
/// let dot = Sequence::<44100>::beep(880.0, 0.1).unwrap();
/// let gap = Sequence::<44100>::silence(0.1).unwrap();
/// let dash = Sequence::<44100>::beep(880.0, 0.3).unwrap();
///
/// let letter = dot.then(gap).then(dash);
/// assert_eq!(letter.length(), Length::Finite(4410 + 4410 + 13230));
/// ```
pub struct Sequence<const FRAME_RATE: u32 = { crate::FRAME_RATE }> {
    parts: VecDeque<Box<dyn Signal + Send>>,
    // Set once any part reports an infinite length; such a part never ends.
    infinite: bool,
}

impl<const FRAME_RATE: u32> Sequence<FRAME_RATE> {
    /// The identity sequence, which yields nothing.
    pub fn empty() -> Self {
        Self {
            parts: VecDeque::new(),
            infinite: false,
        }
    }

    /// Wraps a single signal.
    pub fn from_signal<S>(signal: S) -> Self
    where
        S: AudioSignal<FRAME_RATE> + Send + 'static,
    {
        let infinite = !signal.length().is_finite();
        let mut parts: VecDeque<Box<dyn Signal + Send>> = VecDeque::with_capacity(1);
        parts.push_back(Box::new(signal));
        Self { parts, infinite }
    }

    /// A `frequency` Hz tone cropped to `round(seconds * FRAME_RATE)` frames.
    pub fn beep(frequency: f64, seconds: f64) -> Result<Self> {
        Ok(Self::from_signal(Tone::<FRAME_RATE>::new(frequency)?.crop(seconds)?))
    }

    /// Silence lasting `round(seconds * FRAME_RATE)` frames.
    pub fn silence(seconds: f64) -> Result<Self> {
        Ok(Self::from_signal(Silence::<FRAME_RATE>::new(seconds)?))
    }

    /// True if this sequence has no parts left to play.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// True if some part never ends, so the sequence never ends either.
    ///
    /// Tracked as parts are added; unlike `length`, it does not visit every
    /// part.
    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    /// Appends another operand, which must itself be a sequence.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` for anything other than a sequence.
    pub fn append(self, other: impl Into<Operand<FRAME_RATE>>) -> Result<Self> {
        match other.into() {
            Operand::Sequence(sequence) => Ok(self.then(sequence)),
            operand => Err(Error::TypeMismatch {
                found: operand.describe(),
            }),
        }
    }

    /// Appends another sequence.
    pub fn then(mut self, mut other: Sequence<FRAME_RATE>) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        if self.infinite {
            log::warn!("appending after an infinite sequence; the appended part is unreachable");
        }
        self.infinite |= other.infinite;
        self.parts.append(&mut other.parts);
        self
    }

    /// Appends a single signal.
    pub fn then_signal<S>(self, signal: S) -> Self
    where
        S: AudioSignal<FRAME_RATE> + Send + 'static,
    {
        self.then(Self::from_signal(signal))
    }

    /// Concatenates sequences in order.
    pub fn concat(sequences: impl IntoIterator<Item = Sequence<FRAME_RATE>>) -> Self {
        sequences.into_iter().fold(Self::empty(), Self::then)
    }

    /// Concatenates `sequences`, placing a sequence built by `separator`
    /// between each neighbouring pair.
    pub(crate) fn join_with<I, F>(sequences: I, mut separator: F) -> Result<Self>
    where
        I: IntoIterator<Item = Sequence<FRAME_RATE>>,
        F: FnMut() -> Result<Sequence<FRAME_RATE>>,
    {
        let mut joined = Self::empty();
        for (index, sequence) in sequences.into_iter().enumerate() {
            if index > 0 {
                joined = joined.then(separator()?);
            }
            joined = joined.then(sequence);
        }
        Ok(joined)
    }
}

impl<const FRAME_RATE: u32> Default for Sequence<FRAME_RATE> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const FRAME_RATE: u32> FromIterator<Sequence<FRAME_RATE>> for Sequence<FRAME_RATE> {
    fn from_iter<I: IntoIterator<Item = Sequence<FRAME_RATE>>>(iter: I) -> Self {
        Self::concat(iter)
    }
}

impl<const FRAME_RATE: u32> fmt::Debug for Sequence<FRAME_RATE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("parts", &self.parts.len())
            .field("infinite", &self.infinite)
            .finish()
    }
}

impl<const FRAME_RATE: u32> Signal for Sequence<FRAME_RATE> {
    fn next_sample(&mut self) -> Option<f64> {
        loop {
            let front = self.parts.front_mut()?;
            if let Some(sample) = front.next_sample() {
                return Some(sample);
            }
            self.parts.pop_front();
        }
    }

    fn length(&self) -> Length {
        if self.infinite {
            return Length::Infinite;
        }
        self.parts
            .iter()
            .fold(Length::Finite(0), |total, part| total.then(part.length()))
    }

    fn process(&mut self, buffer: &mut [f64]) -> usize {
        let mut written = 0;
        while written < buffer.len() {
            let Some(front) = self.parts.front_mut() else {
                break;
            };
            let filled = front.process(&mut buffer[written..]);
            written += filled;
            if written < buffer.len() {
                self.parts.pop_front();
            }
        }
        written
    }
}

impl<const FRAME_RATE: u32> AudioSignal<FRAME_RATE> for Sequence<FRAME_RATE> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferedSignal, SignalExt};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn seq(samples: &[f64]) -> Sequence<44100> {
        Sequence::from_signal(BufferedSignal::<44100>::new(samples.to_vec()))
    }

    fn drain(sequence: Sequence<44100>) -> Vec<f64> {
        sequence.samples().collect()
    }

    #[test]
    fn test_concat_lengths_and_order() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let a: Vec<f64> = (0..rng.gen_range(0..50)).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let b: Vec<f64> = (0..rng.gen_range(0..50)).map(|_| rng.gen_range(-1.0..1.0)).collect();

            let joined = seq(&a).append(seq(&b)).unwrap();
            assert_eq!(joined.length(), Length::Finite(a.len() + b.len()));

            let samples = drain(joined);
            assert_eq!(&samples[..a.len()], a.as_slice());
            assert_eq!(&samples[a.len()..], b.as_slice());
        }
    }

    #[test]
    fn test_empty_is_identity() {
        let x = [0.25, -0.5, 0.75];
        assert_eq!(drain(Sequence::empty().then(seq(&x))), x);
        assert_eq!(drain(seq(&x).then(Sequence::empty())), x);
        assert!(Sequence::<44100>::empty().then(Sequence::empty()).is_empty());
    }

    #[test]
    fn test_identity_returns_operand_unchanged() {
        let x = seq(&[1.0, 2.0]).then(seq(&[3.0]));
        let joined = Sequence::empty().then(x);
        assert_eq!(joined.parts.len(), 2);
    }

    #[test]
    fn test_associativity() {
        let (a, b, c) = ([1.0], [2.0, 3.0], [4.0]);
        let left = seq(&a).then(seq(&b)).then(seq(&c));
        let right = seq(&a).then(seq(&b).then(seq(&c)));
        assert_eq!(drain(left), drain(right));
    }

    #[test]
    fn test_append_rejects_non_sequence() {
        let err = seq(&[1.0]).append(0.5).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(err.code(), "TYPE_MISMATCH");
    }

    #[test]
    fn test_beep_length() {
        let beep = Sequence::<44100>::beep(440.0, 0.1).unwrap();
        assert_eq!(beep.length(), Length::Finite(4410));
        let samples = drain(beep);
        assert_eq!(samples.len(), 4410);
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn test_beep_rejects_bad_frequency() {
        assert!(matches!(
            Sequence::<44100>::beep(0.0, 0.1),
            Err(Error::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn test_long_chain_is_lazy() {
        let mut long: Sequence<44100> = (0..10_000).map(|_| seq(&[0.5])).collect();
        long = long.then_signal(Tone::<44100>::new(440.0).unwrap());
        assert_eq!(long.length(), Length::Infinite);
        assert_eq!(long.next_sample(), Some(0.5));
    }

    #[test]
    fn test_infinite_flag_follows_parts() {
        let finite = seq(&[0.1]).then(Sequence::silence(0.01).unwrap());
        assert!(!finite.is_infinite());

        let open = finite.then(Sequence::from_signal(Silence::<44100>::forever()));
        assert!(open.is_infinite());
        let open = open.then(seq(&[0.2]));
        assert!(open.is_infinite());
        assert_eq!(open.length(), Length::Infinite);

        let cropped = Sequence::from_signal(Tone::<44100>::new(440.0).unwrap().crop_frames(5));
        assert!(!cropped.is_infinite());
        assert!(!Sequence::<44100>::empty().is_infinite());
    }

    #[test]
    fn test_long_join_keeps_every_part() {
        let parts = (0..50_000).map(|i| seq(&[i as f64]));
        let joined = Sequence::join_with(parts, || Ok(Sequence::empty())).unwrap();
        assert!(!joined.is_infinite());
        assert_eq!(joined.parts.len(), 50_000);
        assert_eq!(joined.length(), Length::Finite(50_000));
    }

    #[test]
    fn test_process_spans_parts() {
        let mut joined = seq(&[1.0]).then(seq(&[])).then(seq(&[2.0, 3.0]));
        let mut buffer = [0.0; 5];
        assert_eq!(joined.process(&mut buffer), 3);
        assert_eq!(&buffer[..3], &[1.0, 2.0, 3.0]);
        assert!(joined.is_empty());
    }

    #[test]
    fn test_join_with() {
        let joined =
            Sequence::join_with(vec![seq(&[1.0]), seq(&[2.0]), seq(&[3.0])], || Ok(seq(&[0.0])))
                .unwrap();
        assert_eq!(drain(joined), vec![1.0, 0.0, 2.0, 0.0, 3.0]);
    }
}
