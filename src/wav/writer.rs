//! Streaming WAV writer.

use std::io::{self, Seek, SeekFrom, Write};

use super::format::WavFormat;
use super::header::{HEADER_LEN, SizeField, ceiling_frames, pack_header};
use super::sink::{Sink, SinkKind};
use crate::{Error, Result};

/// Lifecycle of a `WavStreamWriter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Nothing written yet.
    Init,
    /// Header written, no sample data yet.
    HeaderCommitted,
    /// Sample data is being appended.
    Streaming,
    /// Header finalised and destination flushed.
    Closed,
}

/// Outcome of a completed WAV write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSummary {
    /// How the destination was treated.
    pub kind: SinkKind,
    /// Whole frames of sample data written.
    pub frames_written: u64,
    /// Frame count declared in the final header.
    ///
    /// Equal to `frames_written` for seekable sinks; the pre-committed
    /// ceiling for streams.
    pub declared_frames: u64,
}

/// Writes a PCM WAV container to a seekable or stream-only destination.
///
/// On a seekable sink the header is written with a zero frame count and
/// rewritten on close. On a stream the header declares the largest frame
/// count the size field can hold, and is never touched again; readers are
/// expected to stop at end of stream.
///
/// Any I/O failure aborts the writer: later calls fail and no finalisation is
/// attempted on drop.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use beepstream::wav::{Sink, WavFormat, WavStreamWriter};
///
/// let sink = Sink::probe(Cursor::new(Vec::new())).unwrap();
/// let mut writer = WavStreamWriter::new(sink, WavFormat::mono());
/// writer.write_chunk(&[0, 0, 0xff, 0x7f]).unwrap();
/// let bytes = writer.close().unwrap().into_inner();
///
/// assert_eq!(bytes.len(), 44 + 4);
/// assert_eq!(&bytes[40..44], &4u32.to_le_bytes());
/// ```
pub struct WavStreamWriter<W: Write + Seek> {
    sink: Option<Sink<W>>,
    kind: SinkKind,
    base: u64,
    format: WavFormat,
    size_field: SizeField,
    state: WriterState,
    data_bytes: u64,
    declared_frames: u64,
    failed: bool,
}

impl<W: Write + Seek> WavStreamWriter<W> {
    /// Creates a writer in the `Init` state. Nothing is written yet.
    pub fn new(sink: Sink<W>, format: WavFormat) -> Self {
        let base = match &sink {
            Sink::Seekable { base, .. } => *base,
            Sink::Stream(_) => 0,
        };
        Self {
            kind: sink.kind(),
            sink: Some(sink),
            base,
            format,
            size_field: SizeField::default(),
            state: WriterState::Init,
            data_bytes: 0,
            declared_frames: 0,
            failed: false,
        }
    }

    /// Limits the header to the given size field layout.
    pub fn with_size_field(mut self, size_field: SizeField) -> Self {
        self.size_field = size_field;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// How the destination is treated.
    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    /// Container parameters.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Whole frames of sample data written so far.
    pub fn frames_written(&self) -> u64 {
        self.data_bytes / self.format.block_align() as u64
    }

    /// Summary of what has been written, with the frame count the header
    /// declares once closed.
    pub fn summary(&self) -> WavSummary {
        let frames_written = self.frames_written();
        WavSummary {
            kind: self.kind,
            frames_written,
            declared_frames: match self.kind {
                SinkKind::Seekable => frames_written,
                SinkKind::Stream => self.declared_frames,
            },
        }
    }

    /// Writes the header. Does nothing once the header is committed.
    pub fn commit_header(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.state != WriterState::Init {
            return Ok(());
        }
        let header = match self.kind {
            SinkKind::Seekable => pack_header(&self.format, 0, self.size_field)?,
            SinkKind::Stream => self.stream_header()?,
        };
        self.with_sink(|sink| sink.get_mut().write_all(&header))?;
        self.state = WriterState::HeaderCommitted;
        Ok(())
    }

    /// Packs the ceiling header, preferring the unsigned 32-bit ceiling and
    /// falling back to the signed 31-bit one if the size field rejects it.
    fn stream_header(&mut self) -> Result<[u8; HEADER_LEN]> {
        let block_align = self.format.block_align() as u64;
        let larger = ceiling_frames(&self.format, SizeField::Unsigned32);
        let (header, frames) =
            match pack_header(&self.format, larger * block_align, self.size_field) {
                Ok(header) => (header, larger),
                Err(Error::HeaderOverflow { .. }) => {
                    let smaller = ceiling_frames(&self.format, SizeField::Signed31);
                    log::debug!("size field rejected {larger} frames, falling back to {smaller}");
                    let header = pack_header(&self.format, smaller * block_align, self.size_field)?;
                    (header, smaller)
                }
                Err(err) => return Err(err),
            };
        log::info!("streaming WAV header declares {frames} frames");
        self.declared_frames = frames;
        Ok(header)
    }

    /// Appends a chunk of interleaved sample bytes, committing the header
    /// first if needed.
    ///
    /// # Errors
    ///
    /// `Error::StreamWriteFailed` on I/O failure. `Error::HeaderOverflow` if
    /// the total would exceed what the header can declare: the size field on
    /// a seekable sink, the committed ceiling on a stream. Nothing is written
    /// in that case.
    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.commit_header()?;
        if chunk.is_empty() {
            return Ok(());
        }
        let total = self.data_bytes + chunk.len() as u64;
        if total > self.data_limit() {
            return Err(Error::HeaderOverflow {
                frames: total / self.format.block_align() as u64,
                field: self.size_field.name(),
            });
        }
        self.with_sink(|sink| sink.get_mut().write_all(chunk))?;
        self.data_bytes = total;
        self.state = WriterState::Streaming;
        Ok(())
    }

    /// Finalises the container and returns the destination.
    pub fn close(mut self) -> Result<W> {
        self.finalize()?;
        self.sink
            .take()
            .map(Sink::into_inner)
            .ok_or_else(|| Error::StreamWriteFailed(io::Error::other("writer already closed")))
    }

    fn finalize(&mut self) -> Result<()> {
        if self.state == WriterState::Closed {
            return Ok(());
        }
        self.commit_header()?;
        match self.kind {
            SinkKind::Seekable => {
                let pad = self.data_bytes & 1;
                let header = pack_header(&self.format, self.data_bytes, self.size_field)?;
                let base = self.base;
                let end = base + HEADER_LEN as u64 + self.data_bytes + pad;
                self.with_sink(|sink| {
                    let inner = sink.get_mut();
                    if pad == 1 {
                        inner.write_all(&[0])?;
                    }
                    inner.seek(SeekFrom::Start(base))?;
                    inner.write_all(&header)?;
                    inner.seek(SeekFrom::Start(end))?;
                    inner.flush()
                })?;
                log::info!(
                    "finalised WAV header: {} frames, {} bytes",
                    self.frames_written(),
                    self.data_bytes
                );
            }
            SinkKind::Stream => {
                self.with_sink(|sink| sink.get_mut().flush())?;
                log::debug!("closed WAV stream after {} bytes", self.data_bytes);
            }
        }
        self.state = WriterState::Closed;
        Ok(())
    }

    /// Most data bytes the header can account for.
    fn data_limit(&self) -> u64 {
        match self.kind {
            SinkKind::Seekable => self.size_field.max_data_bytes(),
            SinkKind::Stream => self.declared_frames * self.format.block_align() as u64,
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.failed {
            return Err(Error::StreamWriteFailed(io::Error::other(
                "writer aborted after an earlier write failure",
            )));
        }
        Ok(())
    }

    fn with_sink<T>(&mut self, op: impl FnOnce(&mut Sink<W>) -> io::Result<T>) -> Result<T> {
        let Some(sink) = self.sink.as_mut() else {
            return Err(Error::StreamWriteFailed(io::Error::other(
                "writer already closed",
            )));
        };
        op(sink).map_err(|err| {
            self.failed = true;
            Error::StreamWriteFailed(err)
        })
    }
}

impl<W: Write + Seek> Drop for WavStreamWriter<W> {
    fn drop(&mut self) {
        if self.sink.is_none() || self.failed || self.state == WriterState::Closed {
            return;
        }
        if let Err(err) = self.finalize() {
            log::warn!("failed to finalise WAV on drop: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::Unseekable;

    #[test]
    fn test_stream_stops_at_declared_ceiling() {
        let sink = Sink::stream(Unseekable(io::sink()));
        let mut writer = WavStreamWriter::new(sink, WavFormat::mono());
        writer.commit_header().unwrap();
        let limit = writer.summary().declared_frames * 2;

        writer.data_bytes = limit - 2;
        writer.write_chunk(&[0, 0]).unwrap();
        assert_eq!(writer.frames_written(), writer.summary().declared_frames);

        let err = writer.write_chunk(&[0, 0]).unwrap_err();
        assert!(matches!(err, Error::HeaderOverflow { .. }));
        assert_eq!(writer.data_bytes, limit);
    }

    #[test]
    fn test_signed_ceiling_is_enforced_on_streams() {
        let sink = Sink::stream(Unseekable(io::sink()));
        let mut writer =
            WavStreamWriter::new(sink, WavFormat::mono()).with_size_field(SizeField::Signed31);
        writer.commit_header().unwrap();
        assert_eq!(writer.summary().declared_frames, 1_073_741_805);

        writer.data_bytes = 1_073_741_805 * 2;
        assert!(matches!(
            writer.write_chunk(&[0, 0]),
            Err(Error::HeaderOverflow { .. })
        ));
    }

    #[test]
    fn test_seekable_stops_at_size_field() {
        let sink = Sink::probe(io::Cursor::new(Vec::<u8>::new())).unwrap();
        let mut writer = WavStreamWriter::new(sink, WavFormat::mono());
        writer.commit_header().unwrap();

        writer.data_bytes = SizeField::Unsigned32.max_data_bytes() - 1;
        assert!(matches!(
            writer.write_chunk(&[0, 0]),
            Err(Error::HeaderOverflow { .. })
        ));
        // Reset so dropping the writer finalises a small, valid header.
        writer.data_bytes = 0;
    }
}
