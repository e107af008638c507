use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::error::FaceError;

/// Number of points in the iBUG 68-point layout.
pub const LANDMARK_COUNT: usize = 68;

/// Nose bridge top, between the eyes.
pub const NOSE_BRIDGE: usize = 27;
/// Outer corner of the subject's right eye (image left).
pub const RIGHT_EYE_OUTER: usize = 36;
pub const RIGHT_EYE_INNER: usize = 39;
pub const LEFT_EYE_INNER: usize = 42;
/// Outer corner of the subject's left eye (image right).
pub const LEFT_EYE_OUTER: usize = 45;

pub const EYE_CORNERS: [usize; 4] = [RIGHT_EYE_OUTER, RIGHT_EYE_INNER, LEFT_EYE_INNER, LEFT_EYE_OUTER];

/// Pixel coordinate of a landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }
}

/// Detected face rectangle, inclusive pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

/// Exactly 68 points in iBUG order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Landmarks(Vec<Point>);

impl Landmarks {
    pub fn new(points: Vec<Point>) -> Result<Self, FaceError> {
        if points.len() != LANDMARK_COUNT {
            return Err(FaceError::LandmarkCount(points.len()));
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

impl std::ops::Index<usize> for Landmarks {
    type Output = Point;

    fn index(&self, i: usize) -> &Point {
        &self.0[i]
    }
}

impl TryFrom<Vec<Point>> for Landmarks {
    type Error = FaceError;

    fn try_from(points: Vec<Point>) -> Result<Self, FaceError> {
        Self::new(points)
    }
}

impl From<Landmarks> for Vec<Point> {
    fn from(l: Landmarks) -> Self {
        l.0
    }
}

/// Face detection plus 68-point shape prediction on an intensity image.
pub trait FaceLandmarker: Send + Sync {
    /// Faces in detection order.
    fn detect_faces(&self, image: &GrayImage) -> Result<Vec<FaceBox>, FaceError>;

    fn landmarks(&self, image: &GrayImage, face: &FaceBox) -> Result<Landmarks, FaceError>;
}

/// Landmarker that answers from precomputed detections, ignoring pixels.
///
/// Useful when landmarks were produced offline, and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLandmarker {
    faces: Vec<(FaceBox, Landmarks)>,
}

impl StaticLandmarker {
    pub fn new(faces: Vec<(FaceBox, Landmarks)>) -> Self {
        Self { faces }
    }

    /// Loads `[{"face": {...}, "landmarks": [{"x":..,"y":..}, ...]}, ...]`.
    pub fn from_json(data: &str) -> Result<Self, FaceError> {
        #[derive(Deserialize)]
        struct Entry {
            face: FaceBox,
            landmarks: Landmarks,
        }
        let entries: Vec<Entry> =
            serde_json::from_str(data).map_err(|e| FaceError::artifact("static landmarks", e))?;
        Ok(Self::new(entries.into_iter().map(|e| (e.face, e.landmarks)).collect()))
    }
}

impl FaceLandmarker for StaticLandmarker {
    fn detect_faces(&self, _image: &GrayImage) -> Result<Vec<FaceBox>, FaceError> {
        Ok(self.faces.iter().map(|(b, _)| *b).collect())
    }

    fn landmarks(&self, _image: &GrayImage, face: &FaceBox) -> Result<Landmarks, FaceError> {
        self.faces
            .iter()
            .find(|(b, _)| b == face)
            .map(|(_, l)| l.clone())
            .ok_or_else(|| FaceError::Detector(format!("no landmarks for {face:?}")))
    }
}
