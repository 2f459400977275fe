//! Plays "SOS" in Morse code on the default output device.

use beepstream::morse;
use beepstream::morse::MorseKeyer;
use beepstream::playback::{CpalDevice, play_signal};

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let keyer = MorseKeyer::<44100>::default();
    let sos = keyer.render(&morse!("... --- ..."))?;

    let mut device = CpalDevice::default_output()?;
    let frames = play_signal(&mut device, vec![sos])?;
    println!("played {frames} frames");
    Ok(())
}
