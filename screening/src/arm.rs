use std::sync::Arc;

use medai_classifier::{ClassifierAdapter, FeatureVector};
use medai_motion::{MeanStdTable, MotionPipeline, PcaLoadings};

use crate::config::{ArmConfig, Config};
use crate::error::ScreeningError;
use crate::modality::Modality;
use crate::service::{ModalityService, check_input_shape};

/// Limb-motion CSV -> PCA components -> classifier.
#[derive(Clone, Debug)]
pub struct ArmService {
    pipeline: Arc<MotionPipeline>,
    classifier: Arc<ClassifierAdapter>,
}

impl ArmService {
    pub fn new(pipeline: MotionPipeline, classifier: ClassifierAdapter) -> Result<Self, ScreeningError> {
        check_input_shape(Modality::Arm, &classifier, &[pipeline.components()])?;
        Ok(Self {
            pipeline: Arc::new(pipeline),
            classifier: Arc::new(classifier),
        })
    }

    pub fn load(config: &Config, arm: &ArmConfig) -> Result<Self, ScreeningError> {
        let mean_std = MeanStdTable::from_path(config.resolve(&arm.mean_std))?;
        let pca = PcaLoadings::from_path(config.resolve(&arm.pca))?;
        let pipeline = MotionPipeline::new(mean_std, pca, arm.components)?;
        let classifier = ClassifierAdapter::load(config.resolve(&arm.classifier))?;
        Self::new(pipeline, classifier)
    }
}

impl ModalityService for ArmService {
    fn modality(&self) -> Modality {
        Modality::Arm
    }

    fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    fn features(&self, bytes: &[u8]) -> Result<FeatureVector, ScreeningError> {
        let values = self.pipeline.process(bytes)?;
        Ok(FeatureVector::named(self.pipeline.component_names(), values))
    }
}
