//! Core sample-sequence trait.
//!
//! A `Signal` is a lazily evaluated stream of floating point samples that may
//! be finite (a beep, a gap) or infinite (a free-running tone). Every stage of
//! the pipeline pulls from the stage before it; nothing is materialised ahead
//! of demand.

/// Number of samples a signal has left to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// The signal ends after this many more samples.
    Finite(usize),
    /// The signal never ends.
    Infinite,
}

impl Length {
    /// Returns true if the signal will eventually end.
    pub fn is_finite(&self) -> bool {
        matches!(self, Length::Finite(_))
    }

    /// Remaining sample count, or `None` for infinite signals.
    pub fn finite(&self) -> Option<usize> {
        match self {
            Length::Finite(n) => Some(*n),
            Length::Infinite => None,
        }
    }

    /// Length of one signal followed by another.
    pub fn then(self, other: Length) -> Length {
        match (self, other) {
            (Length::Finite(a), Length::Finite(b)) => Length::Finite(a.saturating_add(b)),
            _ => Length::Infinite,
        }
    }

    /// The shorter of two lengths.
    pub fn shortest(self, other: Length) -> Length {
        match (self, other) {
            (Length::Finite(a), Length::Finite(b)) => Length::Finite(a.min(b)),
            (Length::Finite(a), Length::Infinite) | (Length::Infinite, Length::Finite(a)) => {
                Length::Finite(a)
            }
            (Length::Infinite, Length::Infinite) => Length::Infinite,
        }
    }
}

/// Common interface for every sample producer and transformer.
///
/// This is the "has more / produce next" contract of the pipeline:
/// `next_sample` yields `Some(sample)` until the signal is exhausted and
/// `None` from then on. Samples are nominally in [-1.0, 1.0] but nothing
/// enforces that here.
pub trait Signal {
    /// Produces the next sample, or `None` once the signal is exhausted.
    fn next_sample(&mut self) -> Option<f64>;

    /// How many samples remain.
    fn length(&self) -> Length;

    /// Fills `buffer` from the front and returns how many samples were written.
    ///
    /// A return value smaller than `buffer.len()` means the signal is exhausted.
    fn process(&mut self, buffer: &mut [f64]) -> usize {
        for (written, slot) in buffer.iter_mut().enumerate() {
            match self.next_sample() {
                Some(sample) => *slot = sample,
                None => return written,
            }
        }
        buffer.len()
    }
}

impl<S: Signal + ?Sized> Signal for Box<S> {
    fn next_sample(&mut self) -> Option<f64> {
        (**self).next_sample()
    }

    fn length(&self) -> Length {
        (**self).length()
    }

    fn process(&mut self, buffer: &mut [f64]) -> usize {
        (**self).process(buffer)
    }
}

impl<S: Signal + ?Sized> Signal for &mut S {
    fn next_sample(&mut self) -> Option<f64> {
        (**self).next_sample()
    }

    fn length(&self) -> Length {
        (**self).length()
    }
}

/// A finite signal replaying samples that are already in memory.
///
/// # Examples
///
/// ```
/// use beepstream::{BufferedSignal, Signal};
///
/// let mut signal = BufferedSignal::<44100>::new(vec![0.25, -0.25]);
/// assert_eq!(signal.next_sample(), Some(0.25));
/// assert_eq!(signal.next_sample(), Some(-0.25));
/// assert_eq!(signal.next_sample(), None);
/// ```
#[derive(Debug, Clone)]
pub struct BufferedSignal<const FRAME_RATE: u32 = { crate::FRAME_RATE }> {
    samples: std::vec::IntoIter<f64>,
}

impl<const FRAME_RATE: u32> BufferedSignal<FRAME_RATE> {
    /// Creates a signal that yields `samples` in order, then ends.
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            samples: samples.into_iter(),
        }
    }
}

impl<const FRAME_RATE: u32> Signal for BufferedSignal<FRAME_RATE> {
    fn next_sample(&mut self) -> Option<f64> {
        self.samples.next()
    }

    fn length(&self) -> Length {
        Length::Finite(self.samples.len())
    }
}

impl<const FRAME_RATE: u32> crate::AudioSignal<FRAME_RATE> for BufferedSignal<FRAME_RATE> {}

/// Adapts a signal into a standard iterator over its samples.
///
/// Returned by `SignalExt::samples`.
pub struct Samples<S: Signal> {
    source: S,
}

impl<S: Signal> Samples<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }

    /// Gives back the wrapped signal.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Signal> Iterator for Samples<S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.source.next_sample()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.source.length() {
            Length::Finite(n) => (n, Some(n)),
            Length::Infinite => (usize::MAX, None),
        }
    }
}
