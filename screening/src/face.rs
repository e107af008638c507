use std::sync::Arc;

use medai_classifier::{ClassifierAdapter, FeatureVector};
use medai_face::{FaceLandmarker, FacePipeline, FaceScaler};

use crate::config::{Config, FaceConfig};
use crate::error::ScreeningError;
use crate::modality::Modality;
use crate::service::{ModalityService, check_input_shape};

/// Face photo -> symmetry ratios -> classifier.
#[derive(Clone, Debug)]
pub struct FaceService {
    pipeline: Arc<FacePipeline>,
    classifier: Arc<ClassifierAdapter>,
}

impl FaceService {
    pub fn new(pipeline: FacePipeline, classifier: ClassifierAdapter) -> Result<Self, ScreeningError> {
        check_input_shape(Modality::Face, &classifier, &[pipeline.geometry().len()])?;
        Ok(Self {
            pipeline: Arc::new(pipeline),
            classifier: Arc::new(classifier),
        })
    }

    /// Loads the scaler and classifier; landmarks come from `landmarker`.
    pub fn load_with(
        config: &Config,
        face: &FaceConfig,
        landmarker: Arc<dyn FaceLandmarker>,
    ) -> Result<Self, ScreeningError> {
        let scaler = FaceScaler::from_path(config.resolve(&face.scaler))?;
        let pipeline = FacePipeline::new(landmarker, face.geometry, scaler)?;
        let classifier = ClassifierAdapter::load(config.resolve(&face.classifier))?;
        Self::new(pipeline, classifier)
    }

    /// Loads everything, including the dlib shape predictor.
    #[cfg(feature = "dlib")]
    pub fn load(config: &Config, face: &FaceConfig) -> Result<Self, ScreeningError> {
        let model = face
            .landmark_model
            .as_ref()
            .ok_or_else(|| ScreeningError::Config("face.landmark_model is required".into()))?;
        let landmarker = medai_face::DlibLandmarker::open(config.resolve(model))?;
        Self::load_with(config, face, Arc::new(landmarker))
    }

    #[cfg(not(feature = "dlib"))]
    pub fn load(_config: &Config, _face: &FaceConfig) -> Result<Self, ScreeningError> {
        Err(ScreeningError::Config(
            "face screening needs a landmark detector; build with the `dlib` feature".into(),
        ))
    }
}

impl ModalityService for FaceService {
    fn modality(&self) -> Modality {
        Modality::Face
    }

    fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    fn features(&self, bytes: &[u8]) -> Result<FeatureVector, ScreeningError> {
        let ratios = self.pipeline.process(bytes)?;
        Ok(FeatureVector::named(self.pipeline.geometry().feature_names(), ratios))
    }
}
