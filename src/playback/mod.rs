//! Live playback through an output device.
//!
//! The device is abstracted by `OutputDevice` and `OutputStream`: open a
//! blocking stream for a format, push byte chunks into it, then stop and
//! close it. `play` drives a frame source into such a stream and always
//! releases it, also when a write fails.
//!
//! With the `playback` feature, `CpalDevice` implements these traits for the
//! system's default output device.

#[cfg(feature = "playback")]
mod cpal_device;

#[cfg(feature = "playback")]
pub use cpal_device::{CpalDevice, CpalStream};

use crate::pcm::{Chunks, FrameSource, Interleave, SampleWidth, Sampler};
use crate::{AudioSignal, Error, Result};

/// Sample layout of a live stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    /// Interleaved channels per frame.
    pub channels: u16,
    /// Frames per second.
    pub frame_rate: u32,
    /// Width of one sample.
    pub width: SampleWidth,
}

impl StreamFormat {
    /// Bytes per frame.
    pub fn frame_size(&self) -> usize {
        self.channels as usize * self.width.bytes()
    }
}

/// An output device that can open blocking playback streams.
pub trait OutputDevice {
    /// The stream type opened by this device.
    type Stream: OutputStream;

    /// Opens a stream for `format`.
    fn open(&mut self, format: &StreamFormat) -> Result<Self::Stream>;
}

/// An open playback stream.
pub trait OutputStream {
    /// Queues interleaved PCM bytes, blocking while the device buffer is full.
    fn write(&mut self, chunk: &[u8]) -> Result<()>;

    /// True once `stop` has completed.
    fn is_stopped(&self) -> bool;

    /// Plays out what is queued and stops the stream.
    fn stop(&mut self) -> Result<()>;

    /// Releases the stream.
    fn close(self) -> Result<()>;
}

/// Stops and closes a stream when dropped. Release failures are logged, not
/// returned, so they never hide the error that ended playback.
struct StreamGuard<S: OutputStream> {
    stream: Option<S>,
}

impl<S: OutputStream> StreamGuard<S> {
    fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        match self.stream.as_mut() {
            Some(stream) => stream.write(chunk),
            None => Err(Error::playback("stream already released")),
        }
    }

    fn release(&mut self) {
        let Some(mut stream) = self.stream.take() else {
            return;
        };
        if !stream.is_stopped() {
            if let Err(err) = stream.stop() {
                log::warn!("failed to stop output stream: {err}");
            }
        }
        if let Err(err) = stream.close() {
            log::warn!("failed to close output stream: {err}");
        }
        log::debug!("output stream released");
    }
}

impl<S: OutputStream> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Plays `frames` on `device` in chunks of `PLAYBACK_CHUNK_FRAMES` frames.
///
/// Returns the number of frames played.
///
/// # Errors
///
/// `Error::UnsupportedFormat` if the frame size does not match `format`, and
/// whatever the device reports for opening or writing.
pub fn play<D, F>(device: &mut D, frames: F, format: StreamFormat) -> Result<u64>
where
    D: OutputDevice,
    F: FrameSource,
{
    if frames.frame_size() != format.frame_size() {
        return Err(Error::unsupported(format!(
            "{}-byte frames for a {}-byte stream format",
            frames.frame_size(),
            format.frame_size()
        )));
    }
    let mut guard = StreamGuard::new(device.open(&format)?);
    log::info!(
        "playing {} channel(s) at {} Hz",
        format.channels,
        format.frame_rate
    );

    let frame_size = format.frame_size().max(1) as u64;
    let mut played = 0;
    for chunk in Chunks::new(frames, crate::PLAYBACK_CHUNK_FRAMES) {
        guard.write(&chunk)?;
        played += chunk.len() as u64 / frame_size;
    }
    guard.release();
    Ok(played)
}

/// Samples `channels` as 16-bit PCM and plays them on `device`.
///
/// Playback ends with the shortest channel.
pub fn play_signal<const FRAME_RATE: u32, D, S>(device: &mut D, channels: Vec<S>) -> Result<u64>
where
    D: OutputDevice,
    S: AudioSignal<FRAME_RATE>,
{
    let sampler = Sampler::default();
    let format = StreamFormat {
        channels: u16::try_from(channels.len())
            .map_err(|_| Error::unsupported(format!("{} channels", channels.len())))?,
        frame_rate: FRAME_RATE,
        width: sampler.width(),
    };
    if format.channels == 0 {
        return Err(Error::unsupported("playback needs at least one channel"));
    }
    let frames = Interleave::new(
        channels
            .into_iter()
            .map(|channel| sampler.pcm(channel))
            .collect(),
    );
    play(device, frames, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcm::RawFrames;
    use crate::{BufferedSignal, Sequence};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Journal {
        opened: Option<StreamFormat>,
        chunks: Vec<usize>,
        stopped: bool,
        closed: bool,
    }

    #[derive(Default)]
    struct MockDevice {
        journal: Rc<RefCell<Journal>>,
        fail_write_at: Option<usize>,
        fail_stop: bool,
        fail_open: bool,
    }

    struct MockStream {
        journal: Rc<RefCell<Journal>>,
        fail_write_at: Option<usize>,
        fail_stop: bool,
    }

    impl OutputDevice for MockDevice {
        type Stream = MockStream;

        fn open(&mut self, format: &StreamFormat) -> Result<MockStream> {
            if self.fail_open {
                return Err(Error::playback("no output device"));
            }
            self.journal.borrow_mut().opened = Some(*format);
            Ok(MockStream {
                journal: Rc::clone(&self.journal),
                fail_write_at: self.fail_write_at,
                fail_stop: self.fail_stop,
            })
        }
    }

    impl OutputStream for MockStream {
        fn write(&mut self, chunk: &[u8]) -> Result<()> {
            let mut journal = self.journal.borrow_mut();
            if self.fail_write_at == Some(journal.chunks.len()) {
                return Err(Error::playback("device unplugged"));
            }
            journal.chunks.push(chunk.len());
            Ok(())
        }

        fn is_stopped(&self) -> bool {
            self.journal.borrow().stopped
        }

        fn stop(&mut self) -> Result<()> {
            if self.fail_stop {
                return Err(Error::playback("stop failed"));
            }
            self.journal.borrow_mut().stopped = true;
            Ok(())
        }

        fn close(self) -> Result<()> {
            self.journal.borrow_mut().closed = true;
            Ok(())
        }
    }

    fn mono16() -> StreamFormat {
        StreamFormat {
            channels: 1,
            frame_rate: 44100,
            width: SampleWidth::Int16,
        }
    }

    fn units(frames: usize) -> RawFrames<std::vec::IntoIter<[u8; 2]>> {
        RawFrames::new(vec![[0u8, 0]; frames].into_iter(), 2)
    }

    #[test]
    fn test_plays_in_fixed_chunks() {
        let mut device = MockDevice::default();
        let played = play(&mut device, units(2500), mono16()).unwrap();
        assert_eq!(played, 2500);

        let journal = device.journal.borrow();
        assert_eq!(journal.opened, Some(mono16()));
        assert_eq!(journal.chunks, vec![2048, 2048, 904]);
        assert!(journal.stopped);
        assert!(journal.closed);
    }

    #[test]
    fn test_write_failure_still_releases() {
        let mut device = MockDevice {
            fail_write_at: Some(1),
            ..Default::default()
        };
        let err = play(&mut device, units(5000), mono16()).unwrap_err();
        assert_eq!(err.code(), "PLAYBACK");
        assert!(err.to_string().contains("unplugged"));

        let journal = device.journal.borrow();
        assert_eq!(journal.chunks.len(), 1);
        assert!(journal.stopped);
        assert!(journal.closed);
    }

    #[test]
    fn test_release_failure_is_suppressed() {
        let mut device = MockDevice {
            fail_stop: true,
            ..Default::default()
        };
        assert_eq!(play(&mut device, units(10), mono16()).unwrap(), 10);
        assert!(device.journal.borrow().closed);
    }

    #[test]
    fn test_open_failure_propagates() {
        let mut device = MockDevice {
            fail_open: true,
            ..Default::default()
        };
        assert!(play(&mut device, units(10), mono16()).is_err());
        assert!(!device.journal.borrow().closed);
    }

    #[test]
    fn test_frame_size_must_match() {
        let mut device = MockDevice::default();
        let format = StreamFormat {
            channels: 2,
            ..mono16()
        };
        let err = play(&mut device, units(10), format).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FORMAT");
        assert!(device.journal.borrow().opened.is_none());
    }

    #[test]
    fn test_play_signal_stereo() {
        let mut device = MockDevice::default();
        let left = Sequence::<44100>::beep(440.0, 0.1).unwrap();
        let right = Sequence::<44100>::silence(0.05).unwrap();
        let played = play_signal(&mut device, vec![left, right]).unwrap();
        assert_eq!(played, 2205);

        let journal = device.journal.borrow();
        assert_eq!(journal.opened.map(|f| f.channels), Some(2));
        assert_eq!(journal.chunks.iter().sum::<usize>(), 2205 * 4);
    }

    #[test]
    fn test_play_signal_needs_a_channel() {
        let mut device = MockDevice::default();
        let none: Vec<BufferedSignal<44100>> = Vec::new();
        assert!(play_signal(&mut device, none).is_err());
    }
}
