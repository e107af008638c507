use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use medai_screening::{CONFIG_ENV, Config, DEFAULT_CONFIG_FILE, Modality, Screening};
use tracing::debug;

use crate::output::Report;
use crate::{Cli, Commands};

pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let (modality, file, features_only) = match &cli.command {
        Commands::Analyze { modality, file } => (Modality::from(*modality), file, false),
        Commands::Features { modality, file } => (Modality::from(*modality), file, true),
    };

    let bytes = match std::fs::read(file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("medai-screen: read {}: {e}", file.display());
            return Ok(ExitCode::from(2));
        }
    };

    let path = config_path(cli.config.as_deref(), std::env::var_os(CONFIG_ENV));
    debug!(config = %path.display(), %modality, input = %file.display(), bytes = bytes.len(), "starting");

    let screening = match Config::from_path(&path).and_then(|c| Screening::load(&c)) {
        Ok(s) => s,
        Err(e) => return emit(cli, &Report::error(modality, &e)),
    };

    if features_only {
        return match screening.features(modality, &bytes) {
            Ok(fv) => emit(cli, &Report::features(modality, &fv)),
            Err(e) => emit(cli, &Report::error(modality, &e)),
        };
    }

    let report = match screening.analyze(modality, &bytes) {
        Ok(p) => Report::result(modality, p),
        Err(e) => Report::error(modality, &e),
    };
    emit(cli, &report)
}

fn emit(cli: &Cli, report: &Report<'_>) -> anyhow::Result<ExitCode> {
    let json = report.to_json(cli.pretty).context("serialize report")?;
    println!("{json}");
    Ok(report.exit_code())
}

/// `--config`, then the environment, then `./screening.yaml`.
fn config_path(flag: Option<&Path>, env: Option<OsString>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_precedence() {
        assert_eq!(
            config_path(Some(Path::new("a.yaml")), Some("b.yaml".into())),
            PathBuf::from("a.yaml")
        );
        assert_eq!(config_path(None, Some("b.yaml".into())), PathBuf::from("b.yaml"));
        assert_eq!(config_path(None, Some("".into())), PathBuf::from("screening.yaml"));
        assert_eq!(config_path(None, None), PathBuf::from("screening.yaml"));
    }
}
