//! Signal fixtures shared by the unit tests.

use std::f64::consts::PI;
use std::io::Cursor;

/// `secs` seconds of a 0.5-amplitude sine at `rate`.
pub fn sine(freq_hz: f64, secs: f64, rate: u32) -> Vec<f32> {
    let n = (secs * rate as f64).round() as usize;
    (0..n)
        .map(|i| (0.5 * (2.0 * PI * freq_hz * i as f64 / rate as f64).sin()) as f32)
        .collect()
}

/// Encodes interleaved samples as a 16-bit PCM WAV file.
pub fn wav_bytes(interleaved: &[f32], rate: u32, channels: u16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut buf = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buf), spec).unwrap();
        for &s in interleaved {
            writer.write_sample((s * 32767.0).round() as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    buf
}
