use std::io::Cursor;

use beepstream::morse::{MorseKeyer, Notation};
use beepstream::wav::{HEADER_LEN, Sink, SinkKind, Unseekable, WavOptions, write_wav};
use beepstream::{
    AudioSignalExt, BufferedSignal, Length, PhaseLoop, SampleWidth, Sampler, Sequence, Signal,
    Tone,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn test_beep_end_to_end() {
    let beep = Sequence::<44100>::beep(440.0, 0.1).unwrap();
    let (cursor, summary) = write_wav(
        Sink::probe(Cursor::new(Vec::new())).unwrap(),
        vec![beep],
        &WavOptions::default(),
    )
    .unwrap();
    assert_eq!(summary.frames_written, 4410);

    let mut reader = hound::WavReader::new(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(reader.spec().sample_format, hound::SampleFormat::Int);
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 4410);
    assert_eq!(samples[0], 0);
    // 440 Hz rounds to a 100-frame period at 44100 Hz.
    assert_eq!(samples[25], i16::MAX);
    assert_eq!(samples[100], 0);
}

#[test]
fn test_stream_and_seekable_agree_on_random_signals() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let len = rng.gen_range(1..2000);
        let samples: Vec<f64> = (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        let chunk_frames = rng.gen_range(1..500);
        let options = WavOptions::default().with_chunk_frames(chunk_frames);

        let (seekable, _) = write_wav(
            Sink::probe(Cursor::new(Vec::new())).unwrap(),
            vec![BufferedSignal::<44100>::new(samples.clone())],
            &options,
        )
        .unwrap();
        let (streamed, summary) = write_wav(
            Sink::probe(Unseekable(Vec::new())).unwrap(),
            vec![BufferedSignal::<44100>::new(samples)],
            &options,
        )
        .unwrap();

        let seekable = seekable.into_inner();
        let streamed = streamed.into_inner();
        assert_eq!(summary.kind, SinkKind::Stream);
        assert_eq!(summary.frames_written, len as u64);
        assert!(summary.declared_frames >= len as u64);
        assert_eq!(&seekable[HEADER_LEN..], &streamed[HEADER_LEN..]);
    }
}

#[test]
fn test_morse_message_to_wav() {
    let keyer = MorseKeyer::<8000>::default();
    let sos = keyer
        .render_text("... --- ...", &Notation::default())
        .unwrap();
    let Length::Finite(frames) = sos.length() else {
        panic!("morse audio is finite");
    };

    let (cursor, summary) = write_wav(
        Sink::probe(Cursor::new(Vec::new())).unwrap(),
        vec![sos],
        &WavOptions::default(),
    )
    .unwrap();
    assert_eq!(summary.frames_written, frames as u64);

    let reader = hound::WavReader::new(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(reader.spec().sample_rate, 8000);
    assert_eq!(reader.len() as usize, frames);
}

#[test]
fn test_stereo_tone_and_phase_loop() {
    let left = Tone::<44100>::new(441.0).unwrap().crop(0.01).unwrap();
    let right = PhaseLoop::<44100>::new(441.0, std::f64::consts::PI)
        .unwrap()
        .crop(0.01)
        .unwrap();
    let (cursor, summary) = write_wav(
        Sink::probe(Cursor::new(Vec::new())).unwrap(),
        vec![Sequence::from_signal(left), Sequence::from_signal(right)],
        &WavOptions::default().with_sampler(Sampler::new(SampleWidth::Int32)),
    )
    .unwrap();
    assert_eq!(summary.frames_written, 441);

    let mut reader = hound::WavReader::new(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.spec().bits_per_sample, 32);
    let samples: Vec<i32> = reader.samples::<i32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 882);
    assert_eq!(samples[0], 0);
    assert_eq!(samples[1], 0);
}
