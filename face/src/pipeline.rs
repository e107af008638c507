use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::FaceError;
use crate::frontality::{frontality_ratio, is_frontal};
use crate::geometry::Geometry;
use crate::gray::decode_gray;
use crate::landmarks::{FaceLandmarker, Landmarks};
use crate::scaler::FaceScaler;

/// Image bytes -> scaled symmetry ratios.
pub struct FacePipeline {
    landmarker: Arc<dyn FaceLandmarker>,
    geometry: Geometry,
    scaler: FaceScaler,
}

impl FacePipeline {
    /// Fails when the scaler was fitted on a different vector length.
    pub fn new(
        landmarker: Arc<dyn FaceLandmarker>,
        geometry: Geometry,
        scaler: FaceScaler,
    ) -> Result<Self, FaceError> {
        if scaler.len() != geometry.len() {
            return Err(FaceError::artifact(
                "face scaler",
                format!("{} entries, {geometry:?} geometry produces {}", scaler.len(), geometry.len()),
            ));
        }
        Ok(Self {
            landmarker,
            geometry,
            scaler,
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Landmarks of the first detected face, after the frontality gate.
    pub fn frontal_landmarks(&self, bytes: &[u8]) -> Result<Landmarks, FaceError> {
        let gray = decode_gray(bytes)?;
        let faces = self.landmarker.detect_faces(&gray)?;
        let Some(face) = faces.first() else {
            warn!(width = gray.width(), height = gray.height(), "no face detected");
            return Err(FaceError::NoFace);
        };
        debug!(faces = faces.len(), ?face, "face detected");

        let landmarks = self.landmarker.landmarks(&gray, face)?;
        let ratio = frontality_ratio(&landmarks);
        if !is_frontal(ratio) {
            warn!(ratio, "non-frontal face");
            return Err(FaceError::NonFrontal { ratio });
        }
        Ok(landmarks)
    }

    /// Unscaled ratios.
    pub fn raw_ratios(&self, bytes: &[u8]) -> Result<Vec<f64>, FaceError> {
        let landmarks = self.frontal_landmarks(bytes)?;
        Ok(self.geometry.ratios(&landmarks))
    }

    pub fn process(&self, bytes: &[u8]) -> Result<Vec<f64>, FaceError> {
        let mut ratios = self.raw_ratios(bytes)?;
        if let Some((index, &value)) = ratios.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(FaceError::NonFinite { index, value });
        }
        debug!(?ratios, "face ratios");
        self.scaler.transform(&mut ratios);
        Ok(ratios)
    }
}

impl std::fmt::Debug for FacePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacePipeline")
            .field("geometry", &self.geometry)
            .field("scaler", &self.scaler)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{FaceBox, Point, StaticLandmarker};
    use crate::testutil::face_points;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    const BOX: FaceBox = FaceBox {
        left: 0,
        top: 0,
        right: 100,
        bottom: 100,
    };

    fn png() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        RgbImage::new(8, 8).write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn identity(len: usize) -> FaceScaler {
        FaceScaler {
            mean: vec![0.0; len],
            scale: vec![1.0; len],
            normalizer: None,
        }
    }

    fn pipeline(landmarks: Vec<(FaceBox, Landmarks)>, geometry: Geometry) -> FacePipeline {
        FacePipeline::new(Arc::new(StaticLandmarker::new(landmarks)), geometry, identity(geometry.len())).unwrap()
    }

    #[test]
    fn output_length_follows_geometry() {
        for g in [Geometry::Midline, Geometry::EyeCorner] {
            let out = pipeline(vec![(BOX, face_points(2))], g).process(&png()).unwrap();
            assert_eq!(out.len(), g.len());
        }
    }

    #[test]
    fn no_face() {
        let err = pipeline(vec![], Geometry::Midline).process(&png()).unwrap_err();
        assert!(matches!(err, FaceError::NoFace));
    }

    #[test]
    fn first_face_wins() {
        let other = FaceBox { left: 200, ..BOX };
        let p = pipeline(vec![(BOX, face_points(3)), (other, face_points(0))], Geometry::Midline);
        let out = p.process(&png()).unwrap();
        assert!((out[0] - 18.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn non_frontal() {
        let mut pts = face_points(0).points().to_vec();
        // Nose bridge 10 px toward the right eye: 10 / 30.
        pts[27] = Point::new(40, 40);
        let lm = Landmarks::new(pts).unwrap();
        let err = pipeline(vec![(BOX, lm)], Geometry::Midline).process(&png()).unwrap_err();
        assert!(matches!(err, FaceError::NonFrontal { ratio } if (ratio - 10.0 / 30.0).abs() < 1e-12));
    }

    /// Moves the outer eye corners so that `dist(27, 36) = right` and
    /// `dist(27, 45) = left`, with the nose bridge at (50, 40).
    fn eye_distances(right: i64, left: i64) -> Landmarks {
        let mut pts = face_points(0).points().to_vec();
        pts[36] = Point::new(50 - right, 40);
        pts[45] = Point::new(50 + left, 40);
        Landmarks::new(pts).unwrap()
    }

    #[test]
    fn frontality_bounds_are_inclusive() {
        // 22 / 25 = 0.88 and 28 / 25 = 1.12
        for (right, left) in [(22, 25), (28, 25)] {
            let out = pipeline(vec![(BOX, eye_distances(right, left))], Geometry::Midline)
                .process(&png())
                .unwrap();
            assert_eq!(out.len(), 8);
        }
    }

    #[test]
    fn just_outside_frontality_bounds() {
        // 219 / 250 = 0.876 and 281 / 250 = 1.124
        for (right, left) in [(219, 250), (281, 250)] {
            let err = pipeline(vec![(BOX, eye_distances(right, left))], Geometry::Midline)
                .process(&png())
                .unwrap_err();
            assert!(matches!(err, FaceError::NonFrontal { .. }), "{right}/{left}: {err}");
        }
    }

    #[test]
    fn degenerate_pair_is_non_finite() {
        let mut pts = face_points(0).points().to_vec();
        // Both ends of (50, 52) on the midline.
        pts[50] = Point::new(50, 74);
        pts[52] = Point::new(50, 74);
        let err = pipeline(vec![(BOX, Landmarks::new(pts).unwrap())], Geometry::Midline)
            .process(&png())
            .unwrap_err();
        assert!(matches!(err, FaceError::NonFinite { index: 2, .. }));
    }

    #[test]
    fn undecodable_image() {
        let err = pipeline(vec![(BOX, face_points(0))], Geometry::Midline)
            .process(b"\x00\x01")
            .unwrap_err();
        assert!(matches!(err, FaceError::Decode(_)));
    }

    #[test]
    fn scaler_length_checked() {
        let err = FacePipeline::new(Arc::new(StaticLandmarker::default()), Geometry::Midline, identity(4)).unwrap_err();
        assert!(matches!(err, FaceError::Artifact { .. }));
    }
}
