//! Boundary to the intake backend.
//!
//! Forms talk to the backend through the [`ApplicationGateway`] and [`ContactGateway`]
//! traits so they can be exercised without a network; [`HttpIntakeClient`] is the
//! production implementation.

mod client;

pub use client::HttpIntakeClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::workflows::contact::ContactPayload;
use crate::workflows::work_with_us::ApplicationPayload;

pub const APPLICATION_ENDPOINT: &str = "work-with-us";
pub const CONTACT_ENDPOINT: &str = "contact";

/// What the backend said when it accepted a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: String,
}

/// JSON body returned by the backend on success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcceptedBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// JSON body returned by the backend on non-2xx responses.
///
/// `errors` is kept loose: backends send plain strings, a single string or
/// `{field, msg}` objects, and only the text parts are shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Text entries of `errors`, joined with ", ".
    pub fn joined_errors(&self) -> Option<String> {
        let texts: Vec<&str> = match self.errors.as_ref()? {
            serde_json::Value::String(text) => vec![text.as_str()],
            serde_json::Value::Array(items) => {
                items.iter().filter_map(serde_json::Value::as_str).collect()
            }
            _ => Vec::new(),
        };
        let texts: Vec<&str> = texts
            .into_iter()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect();
        (!texts.is_empty()).then(|| texts.join(", "))
    }
}

/// Failure of a submission round-trip. Every variant is retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("backend rejected the submission ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("the backend did not answer in time")]
    Timeout,
    #[error("http client unavailable: {0}")]
    Client(String),
}

pub const TIMEOUT_MESSAGE: &str = "La solicitud tardó demasiado. Intenta de nuevo";
pub const CLIENT_MESSAGE: &str = "Error inesperado al enviar la solicitud";

impl ApiError {
    /// Text shown to the user next to the retry affordance.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport(raw) => raw.clone(),
            ApiError::Timeout => TIMEOUT_MESSAGE.to_string(),
            ApiError::Client(_) => CLIENT_MESSAGE.to_string(),
        }
    }
}

#[async_trait]
pub trait ApplicationGateway: Send + Sync {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmissionReceipt, ApiError>;
}

#[async_trait]
pub trait ContactGateway: Send + Sync {
    async fn send_contact(&self, payload: &ContactPayload) -> Result<SubmissionReceipt, ApiError>;
}
