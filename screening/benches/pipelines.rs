use std::f64::consts::PI;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use medai_audio::{AudioPipeline, AudioVariant, Mfcc, MfccConfig, MfccNormalization, Waveform};
use medai_motion::{MeanStdTable, MotionPipeline, PcaLoadings, STAT_NAMES, SensorAxis};

fn make_sine(freq_hz: f64, secs: f64, sample_rate: u32) -> Vec<f32> {
    let n = (secs * sample_rate as f64) as usize;
    (0..n)
        .map(|i| (0.4 * (2.0 * PI * freq_hz * i as f64 / sample_rate as f64).sin()) as f32)
        .collect()
}

fn make_recording() -> Vec<u8> {
    let mut csv = String::from("SamplingTime,AccelerationX,AccelerationY,AccelerationZ,GyroX,GyroY,GyroZ\n");
    for i in 0..500 {
        let t = i as f64 * 0.02;
        csv.push_str(&format!("{t:.2}"));
        for k in 0..6 {
            csv.push_str(&format!(",{}", (t * (k + 1) as f64).sin()));
        }
        csv.push('\n');
    }
    csv.into_bytes()
}

fn motion_pipeline() -> MotionPipeline {
    let names: Vec<String> = SensorAxis::ALL
        .iter()
        .flat_map(|a| STAT_NAMES.iter().map(move |s| format!("{}_{s}", a.prefix())))
        .collect();
    let table = format!(
        ",{}\nmean,{}\nstd,{}\n",
        names.join(","),
        vec!["0"; names.len()].join(","),
        vec!["1"; names.len()].join(",")
    );
    let mean_std = MeanStdTable::from_csv(table.as_bytes()).unwrap();
    let pca = PcaLoadings::new(ndarray::Array2::from_elem((11, 54), 0.1));
    MotionPipeline::new(mean_std, pca, 11).unwrap()
}

fn bench_mfcc_20s(c: &mut Criterion) {
    let mfcc = Mfcc::new(MfccConfig::default());
    let audio = make_sine(220.0, 20.0, 16_000);

    c.bench_function("mfcc_20s", |b| {
        b.iter(|| {
            let _ = black_box(mfcc.compute(black_box(&audio)));
        });
    });
}

fn bench_speech_pipeline_5s(c: &mut Criterion) {
    let pipeline = AudioPipeline::new(AudioVariant::Canonical.config(), MfccNormalization::PerUtterance).unwrap();
    let audio = make_sine(220.0, 5.0, 44_100);

    c.bench_function("speech_pipeline_5s_44k", |b| {
        b.iter(|| {
            let _ = black_box(pipeline.process_waveform(Waveform::new(audio.clone(), 44_100)));
        });
    });
}

fn bench_motion_pipeline(c: &mut Criterion) {
    let pipeline = motion_pipeline();
    let csv = make_recording();

    c.bench_function("motion_pipeline_10s", |b| {
        b.iter(|| {
            let _ = black_box(pipeline.process(black_box(&csv)));
        });
    });
}

criterion_group!(benches, bench_mfcc_20s, bench_speech_pipeline_5s, bench_motion_pipeline);
criterion_main!(benches);
