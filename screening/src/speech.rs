use std::sync::Arc;

use medai_audio::{AudioPipeline, MfccNormalization, MfccStats};
use medai_classifier::{ClassifierAdapter, FeatureVector};

use crate::config::{Config, SpeechConfig};
use crate::error::ScreeningError;
use crate::modality::Modality;
use crate::service::{ModalityService, check_input_shape};

/// Speech recording -> MFCC tensor -> classifier.
#[derive(Clone)]
pub struct SpeechService {
    pipeline: Arc<AudioPipeline>,
    classifier: Arc<ClassifierAdapter>,
}

impl std::fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechService")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl SpeechService {
    pub fn new(pipeline: AudioPipeline, classifier: ClassifierAdapter) -> Result<Self, ScreeningError> {
        check_input_shape(Modality::Speech, &classifier, &pipeline.output_shape())?;
        Ok(Self {
            pipeline: Arc::new(pipeline),
            classifier: Arc::new(classifier),
        })
    }

    pub fn load(config: &Config, speech: &SpeechConfig) -> Result<Self, ScreeningError> {
        let normalization = match &speech.mfcc_stats {
            Some(path) => MfccNormalization::Stored(MfccStats::from_path(config.resolve(path))?),
            None => MfccNormalization::PerUtterance,
        };
        let pipeline = AudioPipeline::new(speech.variant.config(), normalization)?;
        let classifier = ClassifierAdapter::load(config.resolve(&speech.classifier))?;
        Self::new(pipeline, classifier)
    }

    pub fn pipeline(&self) -> &AudioPipeline {
        &self.pipeline
    }
}

impl ModalityService for SpeechService {
    fn modality(&self) -> Modality {
        Modality::Speech
    }

    fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    fn features(&self, bytes: &[u8]) -> Result<FeatureVector, ScreeningError> {
        let mfcc = self.pipeline.process(bytes)?;
        Ok(FeatureVector::from_array(mfcc.into_dyn()))
    }
}
