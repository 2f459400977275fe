//! Output destinations and the seekability probe.

use std::fmt;
use std::io::{self, Seek, SeekFrom, Write};

use crate::{Error, Result};

/// `ESPIPE`, the "illegal seek" errno on Linux and the BSDs.
pub const ESPIPE: i32 = 29;

/// True if `err` means the destination cannot seek.
///
/// Matches `io::ErrorKind::NotSeekable` on any platform, and a raw `ESPIPE`
/// for errors built from an OS code the standard library does not map.
pub fn is_illegal_seek(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotSeekable || err.raw_os_error() == Some(ESPIPE)
}

/// How the writer may treat a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Random access: the header is rewritten once the size is known.
    Seekable,
    /// Sequential append only: the header is committed once, up front.
    Stream,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Seekable => f.write_str("seekable"),
            SinkKind::Stream => f.write_str("stream"),
        }
    }
}

/// A destination classified as seekable or stream-only.
///
/// `Sink::probe` classifies by querying the current position: an `ESPIPE`
/// failure means a stream, any other failure is returned as
/// `Error::SeekProbeFailed`.
#[derive(Debug)]
pub enum Sink<W> {
    /// A destination that supports repositioning.
    Seekable {
        /// The destination.
        inner: W,
        /// Offset at which the header starts.
        base: u64,
    },
    /// A sequential destination such as a pipe.
    Stream(W),
}

impl<W: Write + Seek> Sink<W> {
    /// Classifies `inner` by asking for its position.
    pub fn probe(mut inner: W) -> Result<Self> {
        match inner.stream_position() {
            Ok(base) => {
                log::debug!("sink is seekable, header at offset {base}");
                Ok(Sink::Seekable { inner, base })
            }
            Err(err) if is_illegal_seek(&err) => {
                log::debug!("sink is not seekable, streaming");
                Ok(Sink::Stream(inner))
            }
            Err(err) => Err(Error::SeekProbeFailed(err)),
        }
    }

    /// Declares `inner` seekable without classifying it.
    ///
    /// The current position still becomes the header offset.
    pub fn seekable(mut inner: W) -> Result<Self> {
        let base = inner.stream_position().map_err(Error::SeekProbeFailed)?;
        Ok(Sink::Seekable { inner, base })
    }
}

impl<W> Sink<W> {
    /// Declares `inner` a stream without classifying it.
    pub fn stream(inner: W) -> Self {
        Sink::Stream(inner)
    }

    /// Which way the destination is treated.
    pub fn kind(&self) -> SinkKind {
        match self {
            Sink::Seekable { .. } => SinkKind::Seekable,
            Sink::Stream(_) => SinkKind::Stream,
        }
    }

    /// The destination.
    pub fn get_ref(&self) -> &W {
        match self {
            Sink::Seekable { inner, .. } | Sink::Stream(inner) => inner,
        }
    }

    pub(crate) fn get_mut(&mut self) -> &mut W {
        match self {
            Sink::Seekable { inner, .. } | Sink::Stream(inner) => inner,
        }
    }

    /// Unwraps the destination.
    pub fn into_inner(self) -> W {
        match self {
            Sink::Seekable { inner, .. } | Sink::Stream(inner) => inner,
        }
    }
}

/// Adapts a write-only destination to the writer's `Seek` bound.
///
/// Every position query or seek fails with `NotSeekable`, so `Sink::probe`
/// classifies the wrapped writer as a stream. Useful for stdout or a child
/// process's stdin.
#[derive(Debug)]
pub struct Unseekable<W>(pub W);

impl<W> Unseekable<W> {
    /// Unwraps the destination.
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Write for Unseekable<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W> Seek for Unseekable<W> {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::NotSeekable,
            "destination does not support seeking",
        ))
    }
}
