//! Batching frames into large byte chunks for I/O.

use super::FrameSource;

/// Groups a frame stream into byte chunks of up to `frames_per_chunk` frames.
///
/// Every chunk but the last is full. The stream ends as soon as a chunk would
/// come out empty; an empty chunk is never yielded.
pub struct Chunks<F: FrameSource> {
    source: F,
    frames_per_chunk: usize,
    done: bool,
}

impl<F: FrameSource> Chunks<F> {
    /// Batches `source` into chunks of `frames_per_chunk` frames.
    ///
    /// A chunk size of zero is treated as one.
    pub fn new(source: F, frames_per_chunk: usize) -> Self {
        Self {
            source,
            frames_per_chunk: frames_per_chunk.max(1),
            done: false,
        }
    }

    /// Frames per full chunk.
    pub fn frames_per_chunk(&self) -> usize {
        self.frames_per_chunk
    }

    /// Bytes per frame of the underlying source.
    pub fn frame_size(&self) -> usize {
        self.source.frame_size()
    }
}

impl<F: FrameSource> Iterator for Chunks<F> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        if self.done {
            return None;
        }
        let mut chunk = Vec::with_capacity(self.frames_per_chunk * self.source.frame_size());
        let mut frames = 0;
        while frames < self.frames_per_chunk && self.source.next_frame(&mut chunk) {
            frames += 1;
        }
        if frames < self.frames_per_chunk {
            self.done = true;
        }
        if chunk.is_empty() { None } else { Some(chunk) }
    }
}
