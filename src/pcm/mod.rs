//! PCM conversion, interleaving and chunking.
//!
//! These stages turn floating point signals into the byte stream that the WAV
//! writer and the playback sink consume:
//! - `Sampler` maps samples onto fixed-width signed integers
//! - `Interleave` merges channels into frames
//! - `Chunks` batches frames for efficient writes

mod chunk;
mod interleave;
mod sampler;

pub use chunk::Chunks;
pub use interleave::Interleave;
pub use sampler::{Pcm, PcmWord, SampleWidth, Sampler};

/// A pull-based source of whole PCM frames.
pub trait FrameSource {
    /// Bytes in one frame.
    fn frame_size(&self) -> usize;

    /// Appends the next frame to `out`.
    ///
    /// Returns false, leaving `out` untouched, once the source is exhausted.
    fn next_frame(&mut self, out: &mut Vec<u8>) -> bool;

    /// Iterates over frames as owned byte vectors.
    fn frames(self) -> Frames<Self>
    where
        Self: Sized,
    {
        Frames { source: self }
    }
}

impl<F: FrameSource + ?Sized> FrameSource for Box<F> {
    fn frame_size(&self) -> usize {
        (**self).frame_size()
    }

    fn next_frame(&mut self, out: &mut Vec<u8>) -> bool {
        (**self).next_frame(out)
    }
}

/// Iterator over the frames of a `FrameSource`.
pub struct Frames<F: FrameSource> {
    source: F,
}

impl<F: FrameSource> Iterator for Frames<F> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        let mut frame = Vec::with_capacity(self.source.frame_size());
        self.source.next_frame(&mut frame).then_some(frame)
    }
}

/// Already-packed frames supplied by the caller.
///
/// Each item of the iterator is taken as one frame of `frame_size` bytes; no
/// sampling is applied.
pub struct RawFrames<I> {
    frames: I,
    frame_size: usize,
}

impl<I, T> RawFrames<I>
where
    I: Iterator<Item = T>,
    T: AsRef<[u8]>,
{
    /// Wraps an iterator of packed frames.
    pub fn new(frames: I, frame_size: usize) -> Self {
        Self { frames, frame_size }
    }
}

impl<I, T> FrameSource for RawFrames<I>
where
    I: Iterator<Item = T>,
    T: AsRef<[u8]>,
{
    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn next_frame(&mut self, out: &mut Vec<u8>) -> bool {
        match self.frames.next() {
            Some(frame) => {
                out.extend_from_slice(frame.as_ref());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_frames_pass_bytes_through() {
        let frames: Vec<Vec<u8>> = RawFrames::new(vec![[1u8, 2], [3, 4]].into_iter(), 2)
            .frames()
            .collect();
        assert_eq!(frames, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_boxed_frame_source() {
        let mut boxed: Box<dyn FrameSource> =
            Box::new(RawFrames::new(vec![vec![5u8, 6, 7]].into_iter(), 3));
        assert_eq!(boxed.frame_size(), 3);
        let mut out = Vec::new();
        assert!(boxed.next_frame(&mut out));
        assert_eq!(out, vec![5, 6, 7]);
    }
}
