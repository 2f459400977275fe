//! Multi-channel frame assembly.

use super::FrameSource;

/// Merges per-channel frame streams into multi-channel frames.
///
/// Each output frame is one frame from every channel, in channel order. The
/// moment any channel runs dry the whole stream ends and the partly built
/// frame is discarded, so the output is as long as the shortest channel.
///
/// # Examples
///
/// ```
/// use beepstream::{BufferedSignal, FrameSource, Interleave, Sampler};
///
/// let left = Sampler::default().pcm(BufferedSignal::<44100>::new(vec![1.0, 1.0]));
/// let right = Sampler::default().pcm(BufferedSignal::<44100>::new(vec![-1.0]));
/// let mut stereo = Interleave::new(vec![left, right]);
///
/// let mut frame = Vec::new();
/// assert!(stereo.next_frame(&mut frame));
/// assert_eq!(frame, vec![0xff, 0x7f, 0x00, 0x80]);
/// assert!(!stereo.next_frame(&mut frame));
/// ```
pub struct Interleave<C: FrameSource> {
    channels: Vec<C>,
    exhausted: bool,
}

impl<C: FrameSource> Interleave<C> {
    /// Interleaves `channels` in the given order.
    pub fn new(channels: Vec<C>) -> Self {
        Self {
            channels,
            exhausted: false,
        }
    }

    /// Number of channels per frame.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl<C: FrameSource> FrameSource for Interleave<C> {
    fn frame_size(&self) -> usize {
        self.channels.iter().map(FrameSource::frame_size).sum()
    }

    fn next_frame(&mut self, out: &mut Vec<u8>) -> bool {
        if self.exhausted || self.channels.is_empty() {
            return false;
        }
        let start = out.len();
        for channel in &mut self.channels {
            if !channel.next_frame(out) {
                out.truncate(start);
                self.exhausted = true;
                return false;
            }
        }
        true
    }
}
