//! WAV output for seekable files and non-seekable streams.
//!
//! A WAV header records the size of the sample data, which a streaming writer
//! does not know until the end. Seekable destinations get a placeholder that
//! is rewritten on close. Pipes and other stream-only destinations get a
//! header that declares the largest size the format allows, since it can
//! never be revisited.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use beepstream::Sequence;
//! use beepstream::wav::{Sink, SinkKind, WavOptions, write_wav};
//!
//! let beep = Sequence::<44100>::beep(440.0, 0.1).unwrap();
//! let sink = Sink::probe(Cursor::new(Vec::new())).unwrap();
//! let (cursor, summary) = write_wav(sink, vec![beep], &WavOptions::default()).unwrap();
//!
//! assert_eq!(summary.kind, SinkKind::Seekable);
//! assert_eq!(summary.frames_written, 4410);
//! assert_eq!(cursor.into_inner().len(), 44 + 4410 * 2);
//! ```

mod format;
mod header;
mod sink;
mod writer;


use std::io::{Seek, Write};

pub use format::{PCM_FORMAT_TAG, WavFormat};
pub use header::{HEADER_LEN, SizeField, ceiling_frames, pack_header};
pub use sink::{ESPIPE, Sink, SinkKind, Unseekable, is_illegal_seek};
pub use writer::{WavStreamWriter, WavSummary, WriterState};

use crate::pcm::{Chunks, FrameSource, Interleave, RawFrames, Sampler};
use crate::{AudioSignal, Error, Result};

/// Settings for `write_wav` and `write_wav_raw`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavOptions {
    /// Converts samples to PCM; its width is the container's sample width.
    pub sampler: Sampler,
    /// Frames per write.
    pub chunk_frames: usize,
    /// Header size field layout.
    pub size_field: SizeField,
}

impl Default for WavOptions {
    fn default() -> Self {
        Self {
            sampler: Sampler::default(),
            chunk_frames: crate::DEFAULT_CHUNK_FRAMES,
            size_field: SizeField::default(),
        }
    }
}

impl WavOptions {
    /// Uses `sampler` for conversion.
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Writes `chunk_frames` frames at a time.
    pub fn with_chunk_frames(mut self, chunk_frames: usize) -> Self {
        self.chunk_frames = chunk_frames;
        self
    }

    /// Limits the header to `size_field`.
    pub fn with_size_field(mut self, size_field: SizeField) -> Self {
        self.size_field = size_field;
        self
    }
}

/// Samples, interleaves and writes `channels` as a WAV container.
///
/// One channel per signal, in order. Writing stops at the end of the
/// shortest channel, so at least one channel must be finite.
///
/// # Arguments
///
/// * `sink` - Destination, already classified as seekable or stream
/// * `channels` - One signal per output channel
/// * `options` - Sampler, chunk size and header size field
///
/// # Returns
///
/// The destination together with a summary of what was written.
pub fn write_wav<const FRAME_RATE: u32, W, S>(
    sink: Sink<W>,
    channels: Vec<S>,
    options: &WavOptions,
) -> Result<(W, WavSummary)>
where
    W: Write + Seek,
    S: AudioSignal<FRAME_RATE>,
{
    let format = WavFormat::new(
        channel_count(channels.len())?,
        FRAME_RATE,
        options.sampler.width(),
    )?;
    let sampler = options.sampler;
    let frames = Interleave::new(
        channels
            .into_iter()
            .map(|channel| sampler.pcm(channel))
            .collect(),
    );
    stream_frames(sink, format, frames, options)
}

/// Writes already-packed channels as a WAV container.
///
/// Each item of a channel iterator is one sample of `format.width()` bytes;
/// the sampler in `options` is not used.
pub fn write_wav_raw<W, I, T>(
    sink: Sink<W>,
    channels: Vec<I>,
    format: WavFormat,
    options: &WavOptions,
) -> Result<(W, WavSummary)>
where
    W: Write + Seek,
    I: Iterator<Item = T>,
    T: AsRef<[u8]>,
{
    if channels.len() != format.channels() as usize {
        return Err(Error::unsupported(format!(
            "{} channels supplied for a {}-channel format",
            channels.len(),
            format.channels()
        )));
    }
    let width = format.width().bytes();
    let frames = Interleave::new(
        channels
            .into_iter()
            .map(|channel| RawFrames::new(channel, width))
            .collect(),
    );
    stream_frames(sink, format, frames, options)
}

fn channel_count(channels: usize) -> Result<u16> {
    u16::try_from(channels).map_err(|_| Error::unsupported(format!("{channels} channels")))
}

fn stream_frames<W, F>(
    sink: Sink<W>,
    format: WavFormat,
    frames: F,
    options: &WavOptions,
) -> Result<(W, WavSummary)>
where
    W: Write + Seek,
    F: FrameSource,
{
    let mut writer = WavStreamWriter::new(sink, format).with_size_field(options.size_field);
    writer.commit_header()?;
    for chunk in Chunks::new(frames, options.chunk_frames) {
        writer.write_chunk(&chunk)?;
    }
    let summary = writer.summary();
    let inner = writer.close()?;
    log::debug!(
        "wrote {} frames to a {} sink",
        summary.frames_written,
        summary.kind
    );
    Ok((inner, summary))
}
