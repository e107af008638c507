//! Mouth symmetry ratios.
//!
//! Every ratio is `max(r, 1/r)` of two distances, so 1.0 means the pair is
//! perfectly mirrored and larger values mean more asymmetry.

use serde::{Deserialize, Serialize};

use crate::landmarks::{EYE_CORNERS, Landmarks, Point};

/// Mirrored mouth pairs measured against the facial midline.
pub const MIDLINE_PAIRS: [(usize, usize); 8] = [
    (48, 54),
    (49, 53),
    (50, 52),
    (59, 55),
    (58, 56),
    (60, 64),
    (61, 63),
    (67, 65),
];

/// Mirrored mouth pairs measured against the nearest eye corner.
pub const EYE_CORNER_PAIRS: [(usize, usize); 4] = [(48, 54), (49, 53), (59, 55), (60, 64)];

/// Ratio scheme; each needs a scaler fitted on the same scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Geometry {
    /// Perpendicular distance to the midline through the eye corners.
    #[default]
    Midline,
    /// Euclidean distance to the nearest eye corner.
    EyeCorner,
}

impl Geometry {
    pub fn pairs(self) -> &'static [(usize, usize)] {
        match self {
            Self::Midline => &MIDLINE_PAIRS,
            Self::EyeCorner => &EYE_CORNER_PAIRS,
        }
    }

    /// Length of the ratio vector.
    pub fn len(self) -> usize {
        self.pairs().len()
    }

    pub fn feature_names(self) -> Vec<String> {
        let kind = match self {
            Self::Midline => "midline",
            Self::EyeCorner => "eye",
        };
        self.pairs().iter().map(|(a, b)| format!("{kind}_{a}_{b}")).collect()
    }

    pub fn ratios(self, landmarks: &Landmarks) -> Vec<f64> {
        match self {
            Self::Midline => {
                let midline = Midline::fit(landmarks);
                pair_ratios(landmarks, self.pairs(), |p| midline.distance(p))
            }
            Self::EyeCorner => pair_ratios(landmarks, self.pairs(), |p| {
                EYE_CORNERS
                    .iter()
                    .map(|&c| p.distance(landmarks[c]))
                    .fold(f64::INFINITY, f64::min)
            }),
        }
    }
}

fn pair_ratios(landmarks: &Landmarks, pairs: &[(usize, usize)], dist: impl Fn(Point) -> f64) -> Vec<f64> {
    pairs
        .iter()
        .map(|&(a, b)| {
            let r = dist(landmarks[a]) / dist(landmarks[b]);
            r.max(1.0 / r)
        })
        .collect()
}

/// Line perpendicular to the eye line, through the eye-corner centroid.
///
/// Stored as the centroid and the unit direction of the eye line; the
/// distance to the midline is the projection onto that direction.
#[derive(Debug, Clone, Copy)]
struct Midline {
    cx: f64,
    cy: f64,
    ux: f64,
    uy: f64,
}

impl Midline {
    fn fit(landmarks: &Landmarks) -> Self {
        let pts: Vec<(f64, f64)> = EYE_CORNERS
            .iter()
            .map(|&i| (landmarks[i].x as f64, landmarks[i].y as f64))
            .collect();
        let n = pts.len() as f64;
        let cx = pts.iter().map(|p| p.0).sum::<f64>() / n;
        let cy = pts.iter().map(|p| p.1).sum::<f64>() / n;

        let sxx: f64 = pts.iter().map(|p| (p.0 - cx).powi(2)).sum();
        let sxy: f64 = pts.iter().map(|p| (p.0 - cx) * (p.1 - cy)).sum();

        // Eye line direction (1, k); a vertical eye line has direction (0, 1).
        let (dx, dy): (f64, f64) = if sxx == 0.0 { (0.0, 1.0) } else { (1.0, sxy / sxx) };
        let norm = dx.hypot(dy);
        Self {
            cx,
            cy,
            ux: dx / norm,
            uy: dy / norm,
        }
    }

    fn distance(&self, p: Point) -> f64 {
        ((p.x as f64 - self.cx) * self.ux + (p.y as f64 - self.cy) * self.uy).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::face_points;

    #[test]
    fn symmetric_face_ratios_are_one() {
        let lm = face_points(0);
        for g in [Geometry::Midline, Geometry::EyeCorner] {
            let r = g.ratios(&lm);
            assert_eq!(r.len(), g.len());
            for v in r {
                assert!((v - 1.0).abs() < 1e-12, "{g:?}: {v}");
            }
        }
    }

    #[test]
    fn droop_raises_ratios() {
        let lm = face_points(3);
        let r = Geometry::Midline.ratios(&lm);
        // (48, 54): 15 vs 18 px from x = 50.
        assert!((r[0] - 18.0 / 15.0).abs() < 1e-12);
        assert!(r.iter().all(|&v| v > 1.0));
    }

    #[test]
    fn ratio_is_order_independent() {
        let mut pts = face_points(0).points().to_vec();
        pts[48].x -= 5; // 20 px left of midline, 54 stays at 15
        let left = Geometry::Midline.ratios(&Landmarks::new(pts).unwrap())[0];
        assert!((left - 20.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn tilted_eye_line() {
        // Rotate the synthetic face by 90 degrees about the origin: (x, y) -> (-y, x).
        let rotated: Vec<Point> = face_points(3)
            .points()
            .iter()
            .map(|p| Point::new(-p.y, p.x))
            .collect();
        let r = Geometry::Midline.ratios(&Landmarks::new(rotated).unwrap());
        assert!((r[0] - 18.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn sloped_eye_line_matches_perpendicular_formula() {
        let mut pts = face_points(0).points().to_vec();
        pts[36] = Point::new(30, 38);
        pts[39] = Point::new(42, 39);
        pts[42] = Point::new(58, 41);
        pts[45] = Point::new(70, 42);
        let lm = Landmarks::new(pts).unwrap();

        // Perpendicular through the centroid: y = m x + b with m = -1 / k.
        let k = 96.0 / 928.0;
        let m = -1.0 / k;
        let b = 40.0 - m * 50.0;
        let d = |p: Point| (m * p.x as f64 - p.y as f64 + b).abs() / (m * m + 1.0).sqrt();
        let want = d(lm[48]) / d(lm[54]);
        let want = want.max(1.0 / want);

        let got = Geometry::Midline.ratios(&lm)[0];
        assert!((got - want).abs() < 1e-9, "{got} vs {want}");
    }

    #[test]
    fn eye_corner_uses_nearest_corner() {
        let lm = face_points(4);
        let r = Geometry::EyeCorner.ratios(&lm);
        let d48 = lm[48].distance(lm[36]);
        let d54 = lm[54].distance(lm[45]);
        let want = (d54 / d48).max(d48 / d54);
        assert!((r[0] - want).abs() < 1e-12);
    }

    #[test]
    fn names() {
        assert_eq!(Geometry::Midline.feature_names()[7], "midline_67_65");
        assert_eq!(Geometry::EyeCorner.feature_names().len(), 4);
        let g: Geometry = serde_json::from_str("\"eye-corner\"").unwrap();
        assert_eq!(g, Geometry::EyeCorner);
    }
}
