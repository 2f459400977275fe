//! Output through the system audio device via `cpal`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SyncSender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, OutputCallbackInfo, SampleRate, Stream, StreamConfig};

use super::{OutputDevice, OutputStream, StreamFormat};
use crate::pcm::SampleWidth;
use crate::{Error, Result};

/// Longest wait for queued samples to play out on stop.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// The host's default output device.
pub struct CpalDevice {
    device: Device,
}

impl CpalDevice {
    /// Opens the default output device of the default host.
    pub fn default_output() -> Result<Self> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::playback("no output device"))?;
        match device.name() {
            Ok(name) => log::info!("cpal device: {name}"),
            Err(_) => log::info!("cpal device: (no name)"),
        }
        Ok(Self { device })
    }
}

impl OutputDevice for CpalDevice {
    type Stream = CpalStream;

    fn open(&mut self, format: &StreamFormat) -> Result<CpalStream> {
        if format.width != SampleWidth::Int16 {
            return Err(Error::unsupported(format!(
                "live playback takes 16-bit samples, not {}-bit",
                format.width.bits()
            )));
        }
        let config = StreamConfig {
            channels: format.channels,
            sample_rate: SampleRate(format.frame_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        // About 100ms of audio may be queued before writes block.
        let capacity = (format.frame_rate as usize / 10).max(1) * format.channels as usize;
        let (sender, receiver) = mpsc::sync_channel::<i16>(capacity);
        let drained = Arc::new(AtomicBool::new(false));
        let drained_for_cpal_thread = Arc::clone(&drained);

        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [i16], _: &OutputCallbackInfo| {
                    for output in data.iter_mut() {
                        *output = match receiver.try_recv() {
                            Ok(sample) => sample,
                            Err(TryRecvError::Empty) => 0,
                            Err(TryRecvError::Disconnected) => {
                                drained_for_cpal_thread.store(true, Ordering::Release);
                                0
                            }
                        };
                    }
                },
                |err| log::error!("stream error: {err}"),
                None,
            )
            .map_err(|err| Error::playback(err.to_string()))?;
        stream
            .play()
            .map_err(|err| Error::playback(err.to_string()))?;
        log::debug!(
            "opened cpal stream: {} channel(s), {} Hz",
            format.channels,
            format.frame_rate
        );

        Ok(CpalStream {
            stream,
            sender: Some(sender),
            drained,
            stopped: false,
        })
    }
}

/// A playing `cpal` output stream fed through a bounded channel.
pub struct CpalStream {
    stream: Stream,
    sender: Option<SyncSender<i16>>,
    drained: Arc<AtomicBool>,
    stopped: bool,
}

impl OutputStream for CpalStream {
    fn write(&mut self, chunk: &[u8]) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| Error::playback("stream is stopped"))?;
        for bytes in chunk.chunks_exact(2) {
            sender
                .send(i16::from_le_bytes([bytes[0], bytes[1]]))
                .map_err(|_| Error::playback("audio callback went away"))?;
        }
        Ok(())
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn stop(&mut self) -> Result<()> {
        // Disconnecting tells the callback to report once the queue is empty.
        drop(self.sender.take());
        let started = Instant::now();
        while !self.drained.load(Ordering::Acquire) && started.elapsed() < DRAIN_TIMEOUT {
            thread::sleep(Duration::from_millis(5));
        }
        if !self.drained.load(Ordering::Acquire) {
            log::warn!("output stream did not drain within {DRAIN_TIMEOUT:?}");
        }
        self.stream
            .pause()
            .map_err(|err| Error::playback(err.to_string()))?;
        self.stopped = true;
        Ok(())
    }

    fn close(self) -> Result<()> {
        drop(self.stream);
        log::debug!("closed cpal stream");
        Ok(())
    }
}
