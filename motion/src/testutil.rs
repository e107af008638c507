//! Fixtures shared by the unit tests.

use ndarray::Array2;

use crate::artifacts::{MeanStdTable, PcaLoadings};
use crate::features::STAT_NAMES;
use crate::series::SensorAxis;

/// `rows` samples every `dt` seconds; each axis is a sine with its own
/// frequency, scaled by `amplitude`.
pub fn recording(rows: usize, dt: f64, amplitude: f64) -> String {
    let mut csv = String::from("SamplingTime,AccelerationX,AccelerationY,AccelerationZ,GyroX,GyroY,GyroZ\n");
    for i in 0..rows {
        let t = i as f64 * dt;
        csv.push_str(&format!("{t}"));
        for k in 0..6 {
            let v = amplitude * (t * (k + 1) as f64 * 1.3).sin() + k as f64;
            csv.push_str(&format!(",{v}"));
        }
        csv.push('\n');
    }
    csv
}

/// Zero mean and unit std for all 66 features.
pub fn identity_mean_std() -> MeanStdTable {
    let names: Vec<String> = SensorAxis::ALL
        .iter()
        .flat_map(|a| STAT_NAMES.iter().map(move |s| format!("{}_{s}", a.prefix())))
        .collect();
    let mut csv = String::new();
    csv.push_str(&format!(",{}\n", names.join(",")));
    csv.push_str(&format!("mean,{}\n", vec!["0"; names.len()].join(",")));
    csv.push_str(&format!("std,{}\n", vec!["1"; names.len()].join(",")));
    MeanStdTable::from_csv(csv.as_bytes()).unwrap()
}

/// Component `i` reads selected input `i`.
pub fn unit_pca(components: usize) -> PcaLoadings {
    PcaLoadings::new(Array2::from_shape_fn((components, 54), |(i, j)| if i == j { 1.0 } else { 0.0 }))
}
