use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{info, warn};

use super::{
    AcceptedBody, ApiError, ApplicationGateway, ContactGateway, ErrorBody, SubmissionReceipt,
    APPLICATION_ENDPOINT, CONTACT_ENDPOINT,
};
use crate::config::ApiConfig;
use crate::workflows::contact::ContactPayload;
use crate::workflows::work_with_us::ApplicationPayload;

const APPLICATION_ACCEPTED: &str = "Aplicación enviada exitosamente";
const APPLICATION_FAILED: &str = "Error al enviar la aplicación";
const CONTACT_ACCEPTED: &str = "Mensaje enviado correctamente";
const CONTACT_FAILED: &str = "Error al enviar el formulario";

/// reqwest-backed client for the public intake endpoints. No credentials are sent.
#[derive(Debug, Clone)]
pub struct HttpIntakeClient {
    http: reqwest::Client,
    api: ApiConfig,
}

impl HttpIntakeClient {
    pub fn new(api: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(api.user_agent.clone())
            .timeout(api.timeout)
            .build()
            .map_err(|err| ApiError::Client(err.to_string()))?;
        Ok(Self { http, api })
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    async fn post_json<T>(&self, path: &str, body: &T) -> Result<(StatusCode, String), ApiError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let url = self.api.endpoint(path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        Ok((status, text))
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Message from a 2xx body, if the body carries one.
pub(crate) fn accepted_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<AcceptedBody>(body) {
        Ok(parsed) => parsed.message.filter(|message| !message.trim().is_empty()),
        Err(err) => {
            warn!(error = %err, "backend accepted the submission with a malformed body");
            None
        }
    }
}

pub(crate) fn application_rejection_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .message
            .clone()
            .filter(|message| !message.trim().is_empty())
            .or_else(|| parsed.joined_errors())
            .unwrap_or_else(|| APPLICATION_FAILED.to_string()),
        Err(err) => {
            warn!(error = %err, "backend rejected the application with a malformed body");
            APPLICATION_FAILED.to_string()
        }
    }
}

pub(crate) fn contact_rejection_message(status: u16, body: &str) -> String {
    match status {
        400 => "Datos del formulario inválidos".to_string(),
        422 => "Por favor verifica los datos ingresados".to_string(),
        429 => "Demasiados intentos. Intenta de nuevo más tarde".to_string(),
        500 => "Error del servidor. Intenta de nuevo más tarde".to_string(),
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => CONTACT_FAILED.to_string(),
    }
}

#[async_trait]
impl ApplicationGateway for HttpIntakeClient {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmissionReceipt, ApiError> {
        let (status, body) = self.post_json(APPLICATION_ENDPOINT, payload).await?;
        if status.is_success() {
            info!(status = status.as_u16(), "work-with-us application accepted");
            Ok(SubmissionReceipt {
                message: accepted_message(&body)
                    .unwrap_or_else(|| APPLICATION_ACCEPTED.to_string()),
            })
        } else {
            let message = application_rejection_message(&body);
            warn!(status = status.as_u16(), %message, "work-with-us application rejected");
            Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ContactGateway for HttpIntakeClient {
    async fn send_contact(&self, payload: &ContactPayload) -> Result<SubmissionReceipt, ApiError> {
        let (status, body) = self.post_json(CONTACT_ENDPOINT, payload).await?;
        if status.is_success() {
            info!(status = status.as_u16(), "contact message accepted");
            Ok(SubmissionReceipt {
                message: accepted_message(&body).unwrap_or_else(|| CONTACT_ACCEPTED.to_string()),
            })
        } else {
            let message = contact_rejection_message(status.as_u16(), &body);
            warn!(status = status.as_u16(), %message, "contact message rejected");
            Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_rejection_prefers_message_then_errors() {
        assert_eq!(
            application_rejection_message(r#"{"message":"Cédula duplicada"}"#),
            "Cédula duplicada"
        );
        assert_eq!(
            application_rejection_message(
                r#"{"errors":["email inválido","teléfono inválido"]}"#
            ),
            "email inválido, teléfono inválido"
        );
        assert_eq!(application_rejection_message("<html>502</html>"), APPLICATION_FAILED);
        assert_eq!(application_rejection_message(r#"{"errors":[]}"#), APPLICATION_FAILED);
    }

    #[test]
    fn application_rejection_tolerates_structured_errors() {
        assert_eq!(
            application_rejection_message(
                r#"{"message":"Cédula duplicada","errors":[{"field":"identificationNumber","msg":"duplicado"}]}"#
            ),
            "Cédula duplicada"
        );
        assert_eq!(
            application_rejection_message(r#"{"errors":"Correo inválido"}"#),
            "Correo inválido"
        );
        assert_eq!(
            application_rejection_message(
                r#"{"errors":[{"field":"email"},"teléfono inválido"," "]}"#
            ),
            "teléfono inválido"
        );
        assert_eq!(
            application_rejection_message(r#"{"errors":{"email":"inválido"}}"#),
            APPLICATION_FAILED
        );
    }

    #[test]
    fn contact_rejection_maps_known_statuses() {
        assert_eq!(
            contact_rejection_message(429, ""),
            "Demasiados intentos. Intenta de nuevo más tarde"
        );
        assert_eq!(
            contact_rejection_message(422, r#"{"message":"x"}"#),
            "Por favor verifica los datos ingresados"
        );
        assert_eq!(contact_rejection_message(503, "mantenimiento"), "mantenimiento");
        assert_eq!(
            contact_rejection_message(404, " {\"message\":\"ruta no encontrada\"}\n"),
            r#"{"message":"ruta no encontrada"}"#
        );
        assert_eq!(contact_rejection_message(418, "  "), CONTACT_FAILED);
    }

    #[test]
    fn accepted_message_tolerates_missing_or_malformed_bodies() {
        assert_eq!(
            accepted_message(r#"{"success":true,"message":"Recibido"}"#),
            Some("Recibido".to_string())
        );
        assert_eq!(accepted_message(r#"{"success":true}"#), None);
        assert_eq!(accepted_message("OK"), None);
        assert_eq!(accepted_message(""), None);
    }
}
