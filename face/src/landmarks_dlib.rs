//! [`FaceLandmarker`] implementation using the dlib HOG detector and 68-point shape predictor.

use std::path::Path;
use std::sync::Mutex;

use dlib_face_recognition::{
    FaceDetector, FaceDetectorTrait, ImageMatrix, LandmarkPredictor, LandmarkPredictorTrait, Rectangle,
};
use image::{GrayImage, RgbImage};
use tracing::info;

use crate::error::FaceError;
use crate::landmarks::{FaceBox, FaceLandmarker, Landmarks, Point};

/// The native handles are not thread-safe, so calls are serialized.
pub struct DlibLandmarker {
    detector: Mutex<FaceDetector>,
    predictor: Mutex<LandmarkPredictor>,
}

impl DlibLandmarker {
    /// Loads `shape_predictor_68_face_landmarks.dat` from `model`.
    pub fn open(model: impl AsRef<Path>) -> Result<Self, FaceError> {
        let model = model.as_ref();
        let predictor = LandmarkPredictor::open(model)
            .map_err(|e| FaceError::artifact(model.display().to_string(), e))?;
        info!(path = %model.display(), "loaded dlib shape predictor");
        Ok(Self {
            detector: Mutex::new(FaceDetector::default()),
            predictor: Mutex::new(predictor),
        })
    }
}

fn to_matrix(image: &GrayImage) -> ImageMatrix {
    let rgb = RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y).0[0];
        image::Rgb([v, v, v])
    });
    ImageMatrix::from_image(&rgb)
}

fn poisoned(what: &str) -> FaceError {
    FaceError::Detector(format!("{what} lock poisoned"))
}

impl FaceLandmarker for DlibLandmarker {
    fn detect_faces(&self, image: &GrayImage) -> Result<Vec<FaceBox>, FaceError> {
        let matrix = to_matrix(image);
        let detector = self.detector.lock().map_err(|_| poisoned("detector"))?;
        Ok(detector
            .face_locations(&matrix)
            .iter()
            .map(|r| FaceBox {
                left: r.left,
                top: r.top,
                right: r.right,
                bottom: r.bottom,
            })
            .collect())
    }

    fn landmarks(&self, image: &GrayImage, face: &FaceBox) -> Result<Landmarks, FaceError> {
        let matrix = to_matrix(image);
        let rect = Rectangle {
            left: face.left,
            top: face.top,
            right: face.right,
            bottom: face.bottom,
        };
        let predictor = self.predictor.lock().map_err(|_| poisoned("predictor"))?;
        let shape = predictor.face_landmarks(&matrix, &rect);
        Landmarks::new(shape.iter().map(|p| Point::new(p.x(), p.y())).collect())
    }
}
