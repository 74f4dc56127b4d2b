use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::{debug, warn};

use super::store::{IntakeStore, StoreError};
use crate::workflows::contact::{validate_contact, ContactFormValues, ContactPayload};
use crate::workflows::validation::{
    validate_contact_number, validate_email, validate_identification, validate_max_length,
    validate_required, FieldVerdict,
};
use crate::workflows::work_with_us::gate::{MAX_COMMENTS_CHARS, MAX_DESCRIPTION_CHARS};
use crate::workflows::work_with_us::locations::{is_known_department, municipalities_for};
use crate::workflows::work_with_us::{ApplicationPayload, Specialty};

const APPLICATION_RECEIVED: &str = "Aplicación recibida. Nos pondremos en contacto pronto";
const APPLICATION_INVALID: &str = "La aplicación contiene datos inválidos";
const APPLICATION_DUPLICATE: &str =
    "Ya existe una aplicación registrada con este número de identificación";
const CONTACT_RECEIVED: &str = "Mensaje enviado correctamente";
const CONTACT_INVALID: &str = "Por favor verifica los datos ingresados";
const MALFORMED_BODY: &str = "Datos del formulario inválidos";

/// Routes for `POST /api/work-with-us` and `POST /api/contact`.
pub fn intake_router<S>(store: Arc<S>) -> Router
where
    S: IntakeStore + 'static,
{
    Router::new()
        .route("/api/work-with-us", post(application_handler::<S>))
        .route("/api/contact", post(contact_handler::<S>))
        .with_state(store)
}

/// Every rule an application must satisfy, as user-facing messages.
pub fn application_errors(payload: &ApplicationPayload) -> Vec<String> {
    let mut errors = Vec::new();
    let mut record = |verdict: FieldVerdict| {
        if let FieldVerdict::Invalid(message) = verdict {
            errors.push(message);
        }
    };

    record(validate_required(
        &payload.full_name,
        "El nombre completo es obligatorio",
    ));
    record(validate_identification(&payload.identification_number));
    record(validate_contact_number(&payload.contact_number));
    record(validate_email(&payload.email));
    if !is_known_department(&payload.department) {
        record(FieldVerdict::invalid("Departamento desconocido"));
    } else if !municipalities_for(&payload.department)
        .iter()
        .any(|municipality| *municipality == payload.municipality)
    {
        record(FieldVerdict::invalid(
            "El municipio no pertenece al departamento seleccionado",
        ));
    }
    if payload.specialties.is_empty() {
        record(FieldVerdict::invalid("Seleccione al menos una especialidad"));
    }
    if payload.specialties.contains(&Specialty::Otro) {
        record(validate_required(
            payload.other_specialty_detail.as_deref().unwrap_or_default(),
            "Describa su otra especialidad",
        ));
    }
    record(validate_max_length(
        payload
            .construction_experience_description
            .as_deref()
            .unwrap_or_default(),
        MAX_DESCRIPTION_CHARS,
        "La descripción de experiencia no puede superar 2000 caracteres",
    ));
    for (position, reference) in payload.references.iter().enumerate() {
        if reference.name.trim().is_empty() != reference.phone.trim().is_empty() {
            record(FieldVerdict::invalid(format!(
                "La referencia {} está incompleta",
                position + 1
            )));
        }
    }
    record(validate_max_length(
        payload.additional_comments.as_deref().unwrap_or_default(),
        MAX_COMMENTS_CHARS,
        "Los comentarios no pueden superar 1000 caracteres",
    ));

    errors
}

fn malformed(rejection: JsonRejection) -> Response {
    warn!(error = %rejection, "rejecting malformed intake body");
    let payload = json!({
        "success": false,
        "message": MALFORMED_BODY,
        "errors": [rejection.body_text()],
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn unavailable(err: StoreError) -> Response {
    warn!(error = %err, "intake store failed");
    let payload = json!({
        "success": false,
        "message": "Error del servidor. Intenta de nuevo más tarde",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}

pub(crate) async fn application_handler<S>(
    State(store): State<Arc<S>>,
    body: Result<Json<ApplicationPayload>, JsonRejection>,
) -> Response
where
    S: IntakeStore + 'static,
{
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed(rejection),
    };

    let errors = application_errors(&payload);
    if !errors.is_empty() {
        debug!(count = errors.len(), "application failed server-side validation");
        let payload = json!({
            "success": false,
            "message": APPLICATION_INVALID,
            "errors": errors,
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    match store.save_application(payload) {
        Ok(stored) => {
            debug!(id = %stored.id, "application stored");
            let payload = json!({
                "success": true,
                "message": APPLICATION_RECEIVED,
                "data": { "id": stored.id },
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(StoreError::DuplicateApplication { .. }) => {
            let payload = json!({
                "success": false,
                "message": APPLICATION_DUPLICATE,
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => unavailable(other),
    }
}

pub(crate) async fn contact_handler<S>(
    State(store): State<Arc<S>>,
    body: Result<Json<ContactPayload>, JsonRejection>,
) -> Response
where
    S: IntakeStore + 'static,
{
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed(rejection),
    };

    let values = ContactFormValues {
        name: payload.name.clone(),
        email: payload.email.clone(),
        subject: payload.subject.clone().unwrap_or_default(),
        phone: payload.phone.clone().unwrap_or_default(),
        message: payload.message.clone(),
        honeypot: String::new(),
    };
    let errors = validate_contact(&values);
    if !errors.is_empty() {
        let payload = json!({
            "success": false,
            "message": CONTACT_INVALID,
            "errors": errors.into_values().collect::<Vec<_>>(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    match store.save_contact(payload) {
        Ok(stored) => {
            debug!(id = %stored.id, "contact message stored");
            let payload = json!({
                "success": true,
                "message": CONTACT_RECEIVED,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(other) => unavailable(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::stub::store::InMemoryIntakeStore;
    use crate::workflows::work_with_us::{
        Availability, CompletedProjectsRange, ExperienceLevel, ReferencePayload,
    };

    fn payload() -> ApplicationPayload {
        ApplicationPayload {
            full_name: "Juan Pérez".to_string(),
            identification_number: "1234567".to_string(),
            contact_number: "3001234567".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid"),
            email: "juan@example.com".to_string(),
            department: "Antioquia".to_string(),
            municipality: "Medellín".to_string(),
            specialties: vec![Specialty::Electricidad],
            other_specialty_detail: None,
            experience_level: ExperienceLevel::ThreeToFive,
            has_certifications: true,
            availability: Availability::FullTime,
            completed_projects_range: CompletedProjectsRange::From10To15,
            construction_experience_description: None,
            project_photos: Vec::new(),
            references: vec![ReferencePayload {
                name: String::new(),
                phone: String::new(),
                relationship: None,
            }],
            additional_comments: None,
        }
    }

    async fn post(router: Router, uri: &str, body: Vec<u8>) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn valid_application_is_created_with_sequential_id() {
        let store = Arc::new(InMemoryIntakeStore::default());
        let body = serde_json::to_vec(&payload()).expect("serializes");

        let (status, json) = post(intake_router(store.clone()), "/api/work-with-us", body).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], "app-000001");
        assert_eq!(store.applications().expect("store readable").len(), 1);
    }

    #[tokio::test]
    async fn duplicate_identification_conflicts() {
        let store = Arc::new(InMemoryIntakeStore::default());
        let body = serde_json::to_vec(&payload()).expect("serializes");

        let (first, _) = post(intake_router(store.clone()), "/api/work-with-us", body.clone()).await;
        let (second, json) = post(intake_router(store), "/api/work-with-us", body).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(json["message"], APPLICATION_DUPLICATE);
    }

    #[tokio::test]
    async fn invalid_application_lists_every_error() {
        let store = Arc::new(InMemoryIntakeStore::default());
        let mut invalid = payload();
        invalid.contact_number = "12345".to_string();
        invalid.municipality = "Cali".to_string();
        invalid.specialties.clear();

        let body = serde_json::to_vec(&invalid).expect("serializes");
        let (status, json) = post(intake_router(store.clone()), "/api/work-with-us", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"].as_array().map(Vec::len), Some(3));
        assert!(store.applications().expect("store readable").is_empty());
    }

    #[tokio::test]
    async fn malformed_application_body_is_bad_request() {
        let store = Arc::new(InMemoryIntakeStore::default());
        let (status, json) = post(
            intake_router(store),
            "/api/work-with-us",
            br#"{"fullName":"x"}"#.to_vec(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], MALFORMED_BODY);
    }

    #[tokio::test]
    async fn contact_validation_returns_unprocessable() {
        let store = Arc::new(InMemoryIntakeStore::default());
        let body = json!({
            "name": "A",
            "email": "no-es-correo",
            "message": "hola",
            "timestamp": "2025-10-01T15:30:00Z",
            "userAgent": "test",
        });

        let (status, json) = post(
            intake_router(store.clone()),
            "/api/contact",
            serde_json::to_vec(&body).expect("serializes"),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["errors"].as_array().map(Vec::len), Some(3));
        assert!(store.contacts().expect("store readable").is_empty());
    }

    #[tokio::test]
    async fn contact_message_is_stored() {
        let store = Arc::new(InMemoryIntakeStore::default());
        let body = json!({
            "name": "Ana Gómez",
            "email": "ana@example.com",
            "phone": "3104445566",
            "message": "Quiero cotizar una remodelación.",
            "timestamp": "2025-10-01T15:30:00Z",
            "userAgent": "test",
        });

        let (status, json) = post(
            intake_router(store.clone()),
            "/api/contact",
            serde_json::to_vec(&body).expect("serializes"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], CONTACT_RECEIVED);
        let stored = store.contacts().expect("store readable");
        assert_eq!(stored[0].id.0, "msg-000001");
        assert_eq!(stored[0].payload.phone.as_deref(), Some("3104445566"));
    }
}
