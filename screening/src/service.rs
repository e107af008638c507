use medai_classifier::{ClassifierAdapter, FeatureVector, Prediction};
use tracing::{info, warn};

use crate::error::ScreeningError;
use crate::modality::Modality;

/// One modality: a feature pipeline in front of a classifier.
pub trait ModalityService: Send + Sync {
    fn modality(&self) -> Modality;

    fn classifier(&self) -> &ClassifierAdapter;

    /// Runs the pipeline up to, but not including, the classifier.
    fn features(&self, bytes: &[u8]) -> Result<FeatureVector, ScreeningError>;

    fn analyze(&self, bytes: &[u8]) -> Result<Prediction, ScreeningError> {
        let modality = self.modality();
        let result = self
            .features(bytes)
            .and_then(|features| self.classifier().predict(&features).map_err(ScreeningError::from));
        match &result {
            Ok(p) => info!(%modality, stroke = p.stroke, score = p.score, "screening complete"),
            Err(e) => warn!(%modality, kind = %e.kind(), error = %e, "screening failed"),
        }
        result
    }
}

/// Fails when a classifier was exported for a different feature shape than
/// the pipeline produces.
pub(crate) fn check_input_shape(
    modality: Modality,
    classifier: &ClassifierAdapter,
    produced: &[usize],
) -> Result<(), ScreeningError> {
    if classifier.input_shape() != produced {
        return Err(ScreeningError::Config(format!(
            "{modality} classifier expects input {:?}, pipeline produces {produced:?}",
            classifier.input_shape()
        )));
    }
    Ok(())
}
