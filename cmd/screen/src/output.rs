//! JSON reports printed on stdout.

use std::process::ExitCode;

use medai_screening::{ErrorKind, FeatureVector, Modality, Prediction, ScreeningError};
use serde::Serialize;

/// `{"modality": .., "result" | "features" | "error": ..}`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub modality: Modality,
    #[serde(flatten)]
    pub body: Body<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Body<'a> {
    Result(Prediction),
    Features(Features<'a>),
    Error(ErrorBody),
}

#[derive(Debug, Serialize)]
pub struct Features<'a> {
    pub shape: &'a [usize],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub names: &'a [String],
    pub values: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl<'a> Report<'a> {
    pub fn result(modality: Modality, prediction: Prediction) -> Self {
        Self {
            modality,
            body: Body::Result(prediction),
        }
    }

    pub fn features(modality: Modality, features: &'a FeatureVector) -> Self {
        Self {
            modality,
            body: Body::Features(Features {
                shape: features.shape(),
                names: features.names(),
                values: features.to_flat_vec(),
            }),
        }
    }

    pub fn error(modality: Modality, err: &ScreeningError) -> Self {
        Self {
            modality,
            body: Body::Error(ErrorBody {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }

    /// 2 for errors the caller can fix, 1 for the rest, 0 on success.
    pub fn exit_code(&self) -> ExitCode {
        match &self.body {
            Body::Error(e) if e.kind.is_caller_error() => ExitCode::from(2),
            Body::Error(_) => ExitCode::from(1),
            _ => ExitCode::SUCCESS,
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_layout() {
        let p = Prediction {
            stroke: 1,
            score: 0.75,
        };
        let json = Report::result(Modality::Arm, p).to_json(false).unwrap();
        assert_eq!(json, r#"{"modality":"arm","result":{"stroke":1,"score":0.75}}"#);
    }

    #[test]
    fn error_layout_and_exit_code() {
        let err = ScreeningError::NotConfigured(Modality::Face);
        let report = Report::error(Modality::Face, &err);
        let json = report.to_json(false).unwrap();
        assert!(json.starts_with(r#"{"modality":"face","error":{"kind":"artifact_load","message":"#));
        assert_eq!(report.exit_code(), ExitCode::from(1));
    }

    #[test]
    fn features_layout() {
        let fv = FeatureVector::named(vec!["a".into(), "b".into()], vec![1.0, 2.0]);
        let json = Report::features(Modality::Face, &fv).to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"modality":"face","features":{"shape":[2],"names":["a","b"],"values":[1.0,2.0]}}"#
        );
    }
}
