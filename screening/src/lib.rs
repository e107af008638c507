//! Stroke screening services.
//!
//! Three independent modalities each turn raw bytes into a fixed-shape
//! feature vector and hand it to a pretrained classifier:
//!
//! | modality | input | features | crate |
//! |---|---|---|---|
//! | face | photo | 8 (or 4) mouth symmetry ratios | `medai-face` |
//! | arm | inertial CSV | 11 (or 12) PCA components | `medai-motion` |
//! | speech | audio file | `[1, 13, 626]` MFCC tensor | `medai-audio` |
//!
//! Every result has the same shape, `{"stroke": 0|1, "score": p}`, and every
//! failure carries an [`ErrorKind`].
//!
//! # Usage
//!
//! ```no_run
//! use medai_screening::{Config, Modality, Screening};
//!
//! let config = Config::from_path("screening.yaml")?;
//! let screening = Screening::load(&config)?;
//! let csv = std::fs::read("walk.csv").unwrap();
//! let result = screening.analyze(Modality::Arm, &csv)?;
//! println!("{}", serde_json::to_string(&result).unwrap());
//! # Ok::<(), medai_screening::ScreeningError>(())
//! ```
//!
//! Services hold their artifacts in `Arc`s; a loaded [`Screening`] is
//! `Send + Sync` and cheap to clone.

mod arm;
mod config;
mod error;
mod face;
mod modality;
mod screening;
mod service;
mod speech;

pub use arm::ArmService;
pub use config::{ArmConfig, CONFIG_ENV, Config, DEFAULT_CONFIG_FILE, FaceConfig, SpeechConfig};
pub use error::{ErrorKind, ScreeningError};
pub use face::FaceService;
pub use modality::Modality;
pub use screening::Screening;
pub use service::ModalityService;
pub use speech::SpeechService;

pub use medai_classifier::{FeatureVector, Prediction};
