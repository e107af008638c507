//! Face-image feature pipeline.
//!
//! Measures mouth asymmetry, a proxy for facial drooping, from a single
//! photo:
//!
//! 1. [`decode_gray`]: image bytes -> BT.601 intensity
//! 2. [`FaceLandmarker`]: first detected face -> 68 iBUG landmarks
//! 3. [`frontality_ratio`]: reject faces that are turned away
//! 4. [`Geometry::ratios`]: mirrored mouth pairs -> `max(r, 1/r)` ratios
//! 5. [`FaceScaler::transform`]: stored standard scaler, optional normalizer
//!
//! The dlib-backed landmarker is available with the `dlib` feature.

mod error;
mod frontality;
mod geometry;
mod gray;
mod landmarks;
#[cfg(feature = "dlib")]
mod landmarks_dlib;
mod pipeline;
mod scaler;
#[cfg(test)]
mod testutil;

pub use error::FaceError;
pub use frontality::{FRONTAL_RANGE, frontality_ratio, is_frontal};
pub use geometry::{EYE_CORNER_PAIRS, Geometry, MIDLINE_PAIRS};
pub use gray::{decode_gray, to_gray};
pub use landmarks::{FaceBox, FaceLandmarker, LANDMARK_COUNT, Landmarks, Point, StaticLandmarker};
#[cfg(feature = "dlib")]
pub use landmarks_dlib::DlibLandmarker;
pub use pipeline::FacePipeline;
pub use scaler::{FaceScaler, Normalizer};
