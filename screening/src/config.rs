//! Screening configuration.
//!
//! ```yaml
//! artifacts_dir: artifacts
//! speech:
//!   variant: canonical
//!   classifier: speech_model.json
//!   mfcc_stats: speech_mfcc_stats.json
//! arm:
//!   components: 11
//!   mean_std: csv_mean_std_df.csv
//!   pca: csv_PCA_result_11.csv
//!   classifier: arm_model.json
//! face:
//!   geometry: midline
//!   scaler: face_scaler.json
//!   classifier: face_model.json
//!   landmark_model: shape_predictor_68_face_landmarks.dat
//! ```
//!
//! Relative artifact paths resolve against `artifacts_dir`, which resolves
//! against the directory holding the config file.

use std::path::{Path, PathBuf};

use medai_audio::AudioVariant;
use medai_face::Geometry;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ScreeningError;

/// Environment variable naming the config file when none is given.
pub const CONFIG_ENV: &str = "MEDAI_SCREEN_CONFIG";

/// Config file used when neither a flag nor [`CONFIG_ENV`] is set.
pub const DEFAULT_CONFIG_FILE: &str = "screening.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<SpeechConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm: Option<ArmConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceConfig>,

    /// Directory relative paths start from; the config file's directory.
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    #[serde(default)]
    pub variant: AudioVariant,
    pub classifier: PathBuf,
    /// Stored per-coefficient statistics; absent means per-utterance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfcc_stats: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmConfig {
    #[serde(default = "default_components")]
    pub components: usize,
    pub mean_std: PathBuf,
    pub pca: PathBuf,
    pub classifier: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaceConfig {
    #[serde(default)]
    pub geometry: Geometry,
    pub scaler: PathBuf,
    pub classifier: PathBuf,
    /// dlib shape predictor; used when built with the `dlib` feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark_model: Option<PathBuf>,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_components() -> usize {
    11
}

impl Config {
    /// Loads YAML or JSON, chosen by extension; unknown extensions try YAML
    /// first, then JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScreeningError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| ScreeningError::Config(format!("read {}: {e}", path.display())))?;
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);

        let mut config: Config = match ext.as_deref() {
            Some("json") => parse_json(&data)?,
            Some("yaml") | Some("yml") => parse_yaml(&data)?,
            _ => parse_yaml(&data).or_else(|_| parse_json(&data))?,
        };
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Parses YAML (a JSON document is valid YAML) with paths relative to
    /// `base_dir`.
    pub fn from_yaml(data: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ScreeningError> {
        let mut config: Config = parse_yaml(data.as_bytes())?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute or base-relative location of an artifact.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.base_dir.join(&self.artifacts_dir).join(path)
    }

    fn validate(&self) -> Result<(), ScreeningError> {
        if let Some(arm) = &self.arm {
            if !matches!(arm.components, 11 | 12) {
                return Err(ScreeningError::Config(format!(
                    "arm.components must be 11 or 12, got {}",
                    arm.components
                )));
            }
        }
        Ok(())
    }
}

fn parse_yaml<T: DeserializeOwned>(data: &[u8]) -> Result<T, ScreeningError> {
    serde_yaml::from_slice(data).map_err(|e| ScreeningError::Config(format!("parse yaml: {e}")))
}

fn parse_json<T: DeserializeOwned>(data: &[u8]) -> Result<T, ScreeningError> {
    serde_json::from_slice(data).map_err(|e| ScreeningError::Config(format!("parse json: {e}")))
}
