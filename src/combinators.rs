//! Signal combinators for cropping and concatenating sample sequences.
//!
//! All combinators are lazy: building them consumes no samples, and each one
//! pulls from its sources only as far as its own consumer pulls from it.

use crate::{AudioSignal, Length, Result, Samples, Signal, frames_for_duration};

/// A finite prefix of another signal.
///
/// Ends after a fixed number of frames, or earlier if the source runs out.
///
/// # Examples
///
/// ```
/// use beepstream::{Length, Signal, SignalExt, Tone};
///
/// let beep = Tone::<44100>::new(440.0).unwrap().crop_frames(100);
/// assert_eq!(beep.length(), Length::Finite(100));
/// ```
#[derive(Debug, Clone)]
pub struct Crop<S: Signal> {
    source: S,
    remaining: usize,
}

impl<S: Signal> Crop<S> {
    /// Keeps at most `frames` samples of `source`.
    pub fn new(source: S, frames: usize) -> Self {
        Self {
            source,
            remaining: frames,
        }
    }

    /// Gives back the source, positioned after whatever was consumed.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Signal> Signal for Crop<S> {
    fn next_sample(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        let sample = self.source.next_sample()?;
        self.remaining -= 1;
        Some(sample)
    }

    fn length(&self) -> Length {
        self.source.length().shortest(Length::Finite(self.remaining))
    }

    fn process(&mut self, buffer: &mut [f64]) -> usize {
        let wanted = buffer.len().min(self.remaining);
        let written = self.source.process(&mut buffer[..wanted]);
        self.remaining = if written < wanted {
            0
        } else {
            self.remaining - written
        };
        written
    }
}

impl<const FRAME_RATE: u32, S: AudioSignal<FRAME_RATE>> AudioSignal<FRAME_RATE> for Crop<S> {}

/// Yields every sample of `first`, then every sample of `second`.
///
/// `first` should be finite; if it never ends, `second` is never reached.
///
/// # Examples
///
/// ```
/// use beepstream::{Length, Signal, SignalExt, Silence, Tone};
///
/// let dot = Tone::<44100>::new(880.0).unwrap().crop_frames(10);
/// let mut pair = dot.append(Silence::<44100>::frames(5));
/// assert_eq!(pair.length(), Length::Finite(15));
/// ```
#[derive(Debug, Clone)]
pub struct Chain<A: Signal, B: Signal> {
    first: A,
    second: B,
    first_done: bool,
}

impl<A: Signal, B: Signal> Chain<A, B> {
    /// Creates a new Chain combinator.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            first_done: false,
        }
    }
}

impl<A: Signal, B: Signal> Signal for Chain<A, B> {
    fn next_sample(&mut self) -> Option<f64> {
        if !self.first_done {
            match self.first.next_sample() {
                Some(sample) => return Some(sample),
                None => self.first_done = true,
            }
        }
        self.second.next_sample()
    }

    fn length(&self) -> Length {
        if self.first_done {
            self.second.length()
        } else {
            self.first.length().then(self.second.length())
        }
    }

    fn process(&mut self, buffer: &mut [f64]) -> usize {
        let mut written = 0;
        if !self.first_done {
            written = self.first.process(buffer);
            if written == buffer.len() {
                return written;
            }
            self.first_done = true;
        }
        written + self.second.process(&mut buffer[written..])
    }
}

impl<const FRAME_RATE: u32, A: AudioSignal<FRAME_RATE>, B: AudioSignal<FRAME_RATE>>
    AudioSignal<FRAME_RATE> for Chain<A, B>
{
}

/// Extension trait providing combinator methods on any `Signal`.
///
/// # Examples
///
/// ```
/// use beepstream::{SignalExt, Silence, Tone};
///
/// let tone = Tone::<44100>::new(440.0).unwrap();
/// let samples: Vec<f64> = tone
///     .crop_frames(3)
///     .append(Silence::<44100>::frames(2))
///     .samples()
///     .collect();
/// assert_eq!(samples.len(), 5);
/// assert_eq!(&samples[3..], &[0.0, 0.0]);
/// ```
pub trait SignalExt: Signal + Sized {
    /// Keeps only the first `frames` samples.
    fn crop_frames(self, frames: usize) -> Crop<Self> {
        Crop::new(self, frames)
    }

    /// Plays `other` after this signal ends.
    fn append<S: Signal>(self, other: S) -> Chain<Self, S> {
        Chain::new(self, other)
    }

    /// Uses this signal as a standard iterator over its samples.
    fn samples(self) -> Samples<Self> {
        Samples::new(self)
    }

    /// Erases the concrete type.
    fn boxed(self) -> Box<dyn Signal + Send>
    where
        Self: Send + 'static,
    {
        Box::new(self)
    }
}

// Blanket implementation for all Signal types
impl<T: Signal> SignalExt for T {}

/// Extension trait for frame-rate-aware signals.
///
/// Durations are converted to frames with the signal's own frame rate, so no
/// rate needs to be passed around.
pub trait AudioSignalExt<const FRAME_RATE: u32>: AudioSignal<FRAME_RATE> + Sized {
    /// Keeps only the first `round(seconds * FRAME_RATE)` samples.
    ///
    /// # Examples
    ///
    /// ```
    /// use beepstream::{AudioSignalExt, Length, Signal, Tone};
    ///
    /// let beep = Tone::<44100>::new(440.0).unwrap().crop(0.1).unwrap();
    /// assert_eq!(beep.length(), Length::Finite(4410));
    /// ```
    fn crop(self, seconds: f64) -> Result<Crop<Self>> {
        Ok(Crop::new(self, frames_for_duration(seconds, FRAME_RATE)?))
    }
}

// Blanket implementation for all AudioSignal types
impl<T: AudioSignal<FRAME_RATE>, const FRAME_RATE: u32> AudioSignalExt<FRAME_RATE> for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferedSignal, Silence, Tone};

    fn buffered(samples: &[f64]) -> BufferedSignal<44100> {
        BufferedSignal::new(samples.to_vec())
    }

    #[test]
    fn test_crop_infinite_source() {
        let mut cropped = Tone::<44100>::new(440.0).unwrap().crop_frames(3);
        assert!(cropped.next_sample().is_some());
        assert!(cropped.next_sample().is_some());
        assert!(cropped.next_sample().is_some());
        assert_eq!(cropped.next_sample(), None);
    }

    #[test]
    fn test_crop_shorter_source() {
        let cropped = buffered(&[0.1, 0.2]).crop_frames(10);
        assert_eq!(cropped.length(), Length::Finite(2));
        let samples: Vec<f64> = cropped.samples().collect();
        assert_eq!(samples, vec![0.1, 0.2]);
    }

    #[test]
    fn test_crop_seconds() {
        let beep = Tone::<44100>::new(440.0).unwrap().crop(0.25).unwrap();
        assert_eq!(beep.samples().count(), 11025);
    }

    #[test]
    fn test_crop_leaves_source_positioned() {
        let mut cropped = buffered(&[1.0, 2.0, 3.0]).crop_frames(1);
        cropped.next_sample();
        let mut rest = cropped.into_inner();
        assert_eq!(rest.next_sample(), Some(2.0));
    }

    #[test]
    fn test_chain_order_and_length() {
        let a = [0.1, 0.2, 0.3];
        let b = [0.4, 0.5];
        let chained = buffered(&a).append(buffered(&b));
        assert_eq!(chained.length(), Length::Finite(5));
        let samples: Vec<f64> = chained.samples().collect();
        assert_eq!(&samples[..3], &a);
        assert_eq!(&samples[3..], &b);
    }

    #[test]
    fn test_chain_is_associative() {
        let left: Vec<f64> = buffered(&[1.0])
            .append(buffered(&[2.0]))
            .append(buffered(&[3.0]))
            .samples()
            .collect();
        let right: Vec<f64> = buffered(&[1.0])
            .append(buffered(&[2.0]).append(buffered(&[3.0])))
            .samples()
            .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_chain_into_infinite() {
        let mut chained = buffered(&[0.7]).append(Silence::<44100>::forever());
        assert_eq!(chained.length(), Length::Infinite);
        assert_eq!(chained.next_sample(), Some(0.7));
        assert_eq!(chained.next_sample(), Some(0.0));
    }

    #[test]
    fn test_chain_process_crosses_boundary() {
        let mut chained = buffered(&[1.0, 2.0]).append(buffered(&[3.0, 4.0, 5.0]));
        let mut buffer = [0.0; 4];
        assert_eq!(chained.process(&mut buffer), 4);
        assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(chained.process(&mut buffer), 1);
        assert_eq!(buffer[0], 5.0);
    }

    #[test]
    fn test_chain_is_lazy() {
        struct Counting<'a> {
            pulled: &'a std::cell::Cell<usize>,
        }
        impl Signal for Counting<'_> {
            fn next_sample(&mut self) -> Option<f64> {
                self.pulled.set(self.pulled.get() + 1);
                Some(0.0)
            }
            fn length(&self) -> Length {
                Length::Infinite
            }
        }

        let pulled = std::cell::Cell::new(0);
        let mut chained = buffered(&[0.5, 0.5]).append(Counting { pulled: &pulled });
        assert_eq!(pulled.get(), 0);
        chained.next_sample();
        chained.next_sample();
        assert_eq!(pulled.get(), 0);
        chained.next_sample();
        assert_eq!(pulled.get(), 1);
    }
}
