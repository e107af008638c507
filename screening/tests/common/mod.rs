//! Artifact directories and inputs shared by the integration tests.

#![allow(dead_code)]

use std::f64::consts::PI;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use medai_face::{FaceBox, Landmarks, Point};
use medai_motion::{STAT_NAMES, SensorAxis, selected_feature_names};
use tempfile::TempDir;

pub const FACE_BOX: FaceBox = FaceBox {
    left: 10,
    top: 10,
    right: 90,
    bottom: 90,
};

/// A limb-motion recording: 10 s at 50 Hz, each axis a sine scaled by
/// `amplitude` on top of a per-axis offset.
pub fn recording(amplitude: f64) -> Vec<u8> {
    let mut csv = String::from("SamplingTime,AccelerationX,AccelerationY,AccelerationZ,GyroX,GyroY,GyroZ\n");
    for i in 0..500 {
        let t = i as f64 * 0.02;
        csv.push_str(&format!("{t:.2}"));
        for k in 0..6 {
            let v = amplitude * (t * (k + 1) as f64 * 1.3).sin() + k as f64;
            csv.push_str(&format!(",{v}"));
        }
        csv.push('\n');
    }
    csv.into_bytes()
}

/// Mono 16-bit WAV of a sine.
pub fn wav(freq_hz: f64, secs: f64, rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut buf = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut buf), spec).unwrap();
        let n = (secs * rate as f64) as usize;
        for i in 0..n {
            let s = 0.4 * (2.0 * PI * freq_hz * i as f64 / rate as f64).sin();
            writer.write_sample((s * 32767.0) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    buf
}

pub fn png() -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    RgbImage::new(100, 100).write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Level eyes and a mouth mirrored about x = 50, except that the image-right
/// half of the mouth sits `droop` pixels further out.
pub fn face(droop: i64) -> Landmarks {
    #[rustfmt::skip]
    const MOUTH: [(i64, i64); 20] = [
        (35, 80), (40, 76), (45, 74), (50, 75), (55, 74), (60, 76), (65, 80),
        (60, 85), (55, 87), (50, 88), (45, 87), (40, 85),
        (38, 80), (44, 78), (50, 78), (56, 78), (62, 80),
        (56, 82), (50, 83), (44, 82),
    ];
    let mut points: Vec<Point> = (0..68).map(|i| Point::new(50, i)).collect();
    points[27] = Point::new(50, 40);
    points[36] = Point::new(30, 40);
    points[39] = Point::new(42, 40);
    points[42] = Point::new(58, 40);
    points[45] = Point::new(70, 40);
    for (i, &(x, y)) in MOUTH.iter().enumerate() {
        points[48 + i] = Point::new(x, y);
    }
    for i in [52, 53, 54, 55, 56, 63, 64, 65] {
        points[i].x += droop;
    }
    Landmarks::new(points).unwrap()
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn logistic(shape: &[usize], weights: &[f64], intercept: f64) -> String {
    serde_json::json!({
        "kind": "logistic",
        "input_shape": shape,
        "weights": weights,
        "intercept": intercept,
    })
    .to_string()
}

/// Writes a complete artifact set plus `screening.yaml` and returns the
/// directory.
///
/// - arm: identity standardization, component `i` = selected feature `i`,
///   positive when `AccX_mcr` exceeds 0.1;
/// - face: identity-centred scaler at 1.0, positive when the mouth is
///   asymmetric;
/// - speech: zero weights, so every recording scores exactly 0.5.
pub fn artifacts() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("artifacts");
    std::fs::create_dir(&dir).unwrap();

    let names: Vec<String> = SensorAxis::ALL
        .iter()
        .flat_map(|a| STAT_NAMES.iter().map(move |s| format!("{}_{s}", a.prefix())))
        .collect();
    write(
        &dir,
        "csv_mean_std_df.csv",
        &format!(
            ",{}\nmean,{}\nstd,{}\n",
            names.join(","),
            vec!["0"; names.len()].join(","),
            vec!["1"; names.len()].join(",")
        ),
    );

    let inputs = selected_feature_names();
    let mut pca = format!(",{}\n", inputs.join(","));
    for c in 0..11 {
        let row: Vec<&str> = (0..inputs.len()).map(|j| if j == c { "1" } else { "0" }).collect();
        pca.push_str(&format!("{c},{}\n", row.join(",")));
    }
    write(&dir, "csv_PCA_result_11.csv", &pca);

    let mut arm_weights = vec![0.0; 11];
    arm_weights[0] = 10.0;
    write(&dir, "arm_model.json", &logistic(&[11], &arm_weights, -1.0));

    write(&dir, "face_scaler.json", r#"{"mean": [1,1,1,1,1,1,1,1], "scale": [1,1,1,1,1,1,1,1]}"#);
    write(&dir, "face_model.json", &logistic(&[8], &[20.0; 8], -1.0));

    write(&dir, "speech_model.json", &logistic(&[1, 13, 626], &vec![0.0; 13 * 626], 0.0));

    write(
        root.path(),
        "screening.yaml",
        "artifacts_dir: artifacts\n\
         speech:\n  variant: canonical\n  classifier: speech_model.json\n\
         arm:\n  components: 11\n  mean_std: csv_mean_std_df.csv\n  pca: csv_PCA_result_11.csv\n  classifier: arm_model.json\n",
    );
    root
}
