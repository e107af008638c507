use medai_classifier::{FeatureVector, Prediction};
use tracing::info;

use crate::arm::ArmService;
use crate::config::Config;
use crate::error::ScreeningError;
use crate::face::FaceService;
use crate::modality::Modality;
use crate::service::ModalityService;
use crate::speech::SpeechService;

/// The configured modality services, loaded once and shared read-only.
#[derive(Clone, Debug, Default)]
pub struct Screening {
    face: Option<FaceService>,
    arm: Option<ArmService>,
    speech: Option<SpeechService>,
}

impl Screening {
    /// Loads every configured modality; any artifact failure is fatal.
    pub fn load(config: &Config) -> Result<Self, ScreeningError> {
        let screening = Self {
            face: config.face.as_ref().map(|f| FaceService::load(config, f)).transpose()?,
            arm: config.arm.as_ref().map(|a| ArmService::load(config, a)).transpose()?,
            speech: config.speech.as_ref().map(|s| SpeechService::load(config, s)).transpose()?,
        };
        info!(modalities = ?screening.modalities(), "screening services loaded");
        Ok(screening)
    }

    pub fn with_face(mut self, service: FaceService) -> Self {
        self.face = Some(service);
        self
    }

    pub fn with_arm(mut self, service: ArmService) -> Self {
        self.arm = Some(service);
        self
    }

    pub fn with_speech(mut self, service: SpeechService) -> Self {
        self.speech = Some(service);
        self
    }

    /// Modalities with a loaded service.
    pub fn modalities(&self) -> Vec<Modality> {
        Modality::ALL.into_iter().filter(|&m| self.service(m).is_ok()).collect()
    }

    pub fn service(&self, modality: Modality) -> Result<&dyn ModalityService, ScreeningError> {
        let service: Option<&dyn ModalityService> = match modality {
            Modality::Face => self.face.as_ref().map(|s| s as &dyn ModalityService),
            Modality::Arm => self.arm.as_ref().map(|s| s as &dyn ModalityService),
            Modality::Speech => self.speech.as_ref().map(|s| s as &dyn ModalityService),
        };
        service.ok_or(ScreeningError::NotConfigured(modality))
    }

    pub fn analyze(&self, modality: Modality, bytes: &[u8]) -> Result<Prediction, ScreeningError> {
        self.service(modality)?.analyze(bytes)
    }

    pub fn features(&self, modality: Modality, bytes: &[u8]) -> Result<FeatureVector, ScreeningError> {
        self.service(modality)?.features(bytes)
    }
}
