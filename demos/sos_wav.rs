//! Keys "SOS" in Morse code and writes it as a WAV file.
//!
//! With a path argument the file is written there and its header is
//! finalised on close. Without one the WAV is streamed to stdout, where the
//! header has to be committed up front:
//!
//! ```text
//! cargo run --example sos_wav -- sos.wav
//! cargo run --example sos_wav | aplay
//! ```
//!
//! Set `RUST_LOG=debug` to see the sink classification and header choice.

use std::fs::File;
use std::io;

use beepstream::morse;
use beepstream::morse::{MorseKeyer, MorseTiming};
use beepstream::wav::{Sink, Unseekable, WavOptions, WavSummary, write_wav};

const FRAME_RATE: u32 = 44100;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let keyer = MorseKeyer::<FRAME_RATE>::new(MorseTiming::default().with_unit(0.08));
    let message = keyer
        .render(&morse!("... --- ..."))?
        .then(keyer.word_gap()?)
        .then(keyer.render(&morse!("... --- ..."))?);
    let options = WavOptions::default();

    let summary: WavSummary = match std::env::args().nth(1) {
        Some(path) => {
            let sink = Sink::probe(File::create(&path)?)?;
            let (_, summary) = write_wav(sink, vec![message], &options)?;
            eprintln!("wrote {} frames to {path}", summary.frames_written);
            summary
        }
        None => {
            let sink = Sink::probe(Unseekable(io::stdout().lock()))?;
            let (_, summary) = write_wav(sink, vec![message], &options)?;
            summary
        }
    };
    eprintln!(
        "{} sink, header declares {} frames",
        summary.kind, summary.declared_frames
    );
    Ok(())
}
