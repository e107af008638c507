//! Head-pose gate based on eye-to-nose symmetry.

use crate::landmarks::{LEFT_EYE_OUTER, Landmarks, NOSE_BRIDGE, RIGHT_EYE_OUTER};

/// Accepted range for [`frontality_ratio`], inclusive on both ends.
pub const FRONTAL_RANGE: (f64, f64) = (0.88, 1.12);

/// `dist(27, 36) / dist(27, 45)`: close to 1 when the face looks straight
/// at the camera.
pub fn frontality_ratio(landmarks: &Landmarks) -> f64 {
    let nose = landmarks[NOSE_BRIDGE];
    nose.distance(landmarks[RIGHT_EYE_OUTER]) / nose.distance(landmarks[LEFT_EYE_OUTER])
}

pub fn is_frontal(ratio: f64) -> bool {
    (FRONTAL_RANGE.0..=FRONTAL_RANGE.1).contains(&ratio)
}
