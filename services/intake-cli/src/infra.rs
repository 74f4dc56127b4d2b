use metrics_exporter_prometheus::PrometheusHandle;
use simetrica_intake::config::{ApiConfig, AppConfig};
use simetrica_intake::error::AppError;
use simetrica_intake::workflows::submission::SubmissionOutcome;
use simetrica_intake::workflows::work_with_us::ProjectPhoto;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configured API settings, with the base URL optionally replaced from the command line.
pub(crate) fn api_config(
    config: &AppConfig,
    api_url: Option<String>,
) -> Result<ApiConfig, AppError> {
    match api_url {
        Some(url) => Ok(ApiConfig::new(
            url,
            config.api.timeout,
            config.api.user_agent.clone(),
        )?),
        None => Ok(config.api.clone()),
    }
}

/// Photo metadata for a local file; the type is guessed from the extension.
pub(crate) fn photo_from_path(path: &Path) -> Result<ProjectPhoto, AppError> {
    let metadata = std::fs::metadata(path)?;
    let absolute = path.canonicalize()?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| absolute.display().to_string());
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();

    ProjectPhoto::new(
        format!("file://{}", absolute.display()),
        filename,
        mime_type.essence_str(),
        metadata.len(),
    )
    .map_err(|rejection| AppError::Input(rejection.to_string()))
}

pub(crate) fn print_outcome(outcome: SubmissionOutcome) -> Result<(), AppError> {
    match outcome {
        SubmissionOutcome::Accepted { message } => {
            println!("{message}");
            Ok(())
        }
        SubmissionOutcome::Failed { message } => Err(AppError::Submission(message)),
        SubmissionOutcome::Discarded => Ok(()),
    }
}
