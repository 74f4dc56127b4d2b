//! Contact form: single screen, aggregate validation, reset on success.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, SubmissionReceipt};
use crate::workflows::submission::{SubmissionOutcome, Ticket, TicketCounter, TicketId};
use crate::workflows::validation::{validate_email, validate_min_length, FieldVerdict};

pub const NAME_MESSAGE: &str = "Por favor ingrese su nombre completo.";
pub const EMAIL_MESSAGE: &str = "Por favor ingrese un correo electrónico válido.";
pub const MESSAGE_MESSAGE: &str = "El mensaje debe tener al menos 10 caracteres.";
pub const PHONE_MESSAGE: &str = "Por favor ingrese un número de teléfono válido.";
pub const HONEYPOT_MESSAGE: &str = "Spam detectado.";

/// Inputs in on-screen order; the smallest invalid one receives focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Phone,
    Message,
    Honeypot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormValues {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    #[serde(default, skip_serializing)]
    pub honeypot: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

/// Body of `POST /contact`. The honeypot never leaves the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactSubmitError {
    #[error("the contact message is already being sent")]
    InFlight,
    #[error("{message}")]
    Invalid { field: ContactField, message: String },
}

/// Checks every field and returns all failures, keyed in on-screen order.
pub fn validate_contact(values: &ContactFormValues) -> BTreeMap<ContactField, String> {
    let mut errors = BTreeMap::new();
    let mut record = |field: ContactField, verdict: FieldVerdict| {
        if let FieldVerdict::Invalid(message) = verdict {
            errors.insert(field, message);
        }
    };

    record(
        ContactField::Name,
        validate_min_length(&values.name, 2, NAME_MESSAGE),
    );
    record(
        ContactField::Email,
        match validate_email(values.email.trim()) {
            FieldVerdict::Valid => FieldVerdict::Valid,
            FieldVerdict::Invalid(_) => FieldVerdict::invalid(EMAIL_MESSAGE),
        },
    );
    record(
        ContactField::Message,
        validate_min_length(&values.message, 10, MESSAGE_MESSAGE),
    );
    let phone = values.phone.trim();
    if !phone.is_empty() {
        record(
            ContactField::Phone,
            validate_min_length(phone, 6, PHONE_MESSAGE),
        );
    }
    if !values.honeypot.trim().is_empty() {
        record(ContactField::Honeypot, FieldVerdict::invalid(HONEYPOT_MESSAGE));
    }

    errors
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ContactPayload {
    pub fn from_values(values: &ContactFormValues, user_agent: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: values.name.trim().to_string(),
            email: values.email.trim().to_string(),
            subject: optional(&values.subject),
            phone: optional(&values.phone),
            message: values.message.trim().to_string(),
            timestamp: now,
            user_agent: user_agent.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: ContactFormValues,
    errors: BTreeMap<ContactField, String>,
    status: ContactStatus,
    in_flight: Option<TicketId>,
    tickets: TicketCounter,
}

impl ContactForm {
    /// Prefills the form; the honeypot always starts empty.
    pub fn new(initial: ContactFormValues) -> Self {
        Self {
            values: ContactFormValues {
                honeypot: String::new(),
                ..initial
            },
            ..Self::default()
        }
    }

    pub fn values(&self) -> &ContactFormValues {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<ContactField, String> {
        &self.errors
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> ContactStatus {
        self.status
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Editing a field clears its recorded error; nothing is re-validated until submit.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.values.name = value,
            ContactField::Email => self.values.email = value,
            ContactField::Subject => self.values.subject = value,
            ContactField::Phone => self.values.phone = value,
            ContactField::Message => self.values.message = value,
            ContactField::Honeypot => self.values.honeypot = value,
        }
        self.errors.remove(&field);
    }

    pub fn begin_submission(
        &mut self,
        user_agent: &str,
        now: DateTime<Utc>,
    ) -> Result<Ticket<ContactPayload>, ContactSubmitError> {
        if self.in_flight.is_some() {
            return Err(ContactSubmitError::InFlight);
        }

        self.errors = validate_contact(&self.values);
        if let Some((field, message)) = self.errors.iter().next() {
            return Err(ContactSubmitError::Invalid {
                field: *field,
                message: message.clone(),
            });
        }

        let ticket = self
            .tickets
            .issue(ContactPayload::from_values(&self.values, user_agent, now));
        self.in_flight = Some(ticket.id());
        self.status = ContactStatus::Sending;
        Ok(ticket)
    }

    pub fn complete_submission(
        &mut self,
        ticket: TicketId,
        result: Result<SubmissionReceipt, ApiError>,
    ) -> SubmissionOutcome {
        if self.in_flight != Some(ticket) {
            return SubmissionOutcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(receipt) => {
                self.values = ContactFormValues::default();
                self.errors.clear();
                self.status = ContactStatus::Success;
                SubmissionOutcome::Accepted {
                    message: receipt.message,
                }
            }
            Err(err) => {
                let message = err.user_message();
                self.errors.clear();
                self.errors.insert(ContactField::Message, message.clone());
                self.status = ContactStatus::Error;
                SubmissionOutcome::Failed { message }
            }
        }
    }

    /// Forget any outstanding request, e.g. when the page unmounts.
    pub fn abandon(&mut self) {
        self.in_flight = None;
        self.status = ContactStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled() -> ContactFormValues {
        ContactFormValues {
            name: "  Ana Gómez ".to_string(),
            email: "ana@example.com ".to_string(),
            subject: String::new(),
            phone: "3104445566".to_string(),
            message: "Quiero cotizar una remodelación de cocina.".to_string(),
            honeypot: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 15, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn validation_collects_every_failure() {
        let values = ContactFormValues {
            name: "A".to_string(),
            email: "ana".to_string(),
            phone: "123".to_string(),
            message: "hola".to_string(),
            honeypot: "bot".to_string(),
            ..ContactFormValues::default()
        };
        let errors = validate_contact(&values);
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![
                ContactField::Name,
                ContactField::Email,
                ContactField::Phone,
                ContactField::Message,
                ContactField::Honeypot
            ]
        );
    }

    #[test]
    fn invalid_submit_reports_first_field_and_stays_idle() {
        let mut form = ContactForm::new(ContactFormValues {
            name: "Ana".to_string(),
            ..ContactFormValues::default()
        });
        match form.begin_submission("ua", now()) {
            Err(ContactSubmitError::Invalid { field, .. }) => {
                assert_eq!(field, ContactField::Email)
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(form.status(), ContactStatus::Idle);
        assert!(form.error(ContactField::Message).is_some());

        form.set(ContactField::Message, "Necesito una visita técnica");
        assert!(form.error(ContactField::Message).is_none());
        assert!(form.error(ContactField::Email).is_some());
    }

    #[test]
    fn payload_trims_and_drops_empty_optionals() {
        let mut form = ContactForm::new(filled());
        let ticket = form.begin_submission("simetrica-test", now()).expect("valid");
        let body = serde_json::to_value(ticket.payload()).expect("serializes");
        assert_eq!(body["name"], "Ana Gómez");
        assert_eq!(body["email"], "ana@example.com");
        assert_eq!(body["userAgent"], "simetrica-test");
        assert_eq!(body["timestamp"], "2025-10-01T15:30:00Z");
        assert!(body.get("subject").is_none());
        assert!(body.get("honeypot").is_none());
    }

    #[test]
    fn second_submit_while_sending_is_refused() {
        let mut form = ContactForm::new(filled());
        let _ticket = form.begin_submission("ua", now()).expect("first submit");
        assert_eq!(form.status(), ContactStatus::Sending);
        assert_eq!(
            form.begin_submission("ua", now()).expect_err("guarded"),
            ContactSubmitError::InFlight
        );
    }

    #[test]
    fn success_resets_and_failure_keeps_values() {
        let mut form = ContactForm::new(filled());
        let ticket = form.begin_submission("ua", now()).expect("valid");
        let outcome = form.complete_submission(
            ticket.id(),
            Err(ApiError::Rejected {
                status: 429,
                message: "Demasiados intentos. Intenta de nuevo más tarde".to_string(),
            }),
        );
        assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
        assert_eq!(form.status(), ContactStatus::Error);
        assert_eq!(form.values(), &filled());
        assert_eq!(
            form.error(ContactField::Message),
            Some("Demasiados intentos. Intenta de nuevo más tarde")
        );

        let ticket = form.begin_submission("ua", now()).expect("retry allowed");
        let outcome = form.complete_submission(
            ticket.id(),
            Ok(SubmissionReceipt {
                message: "Mensaje enviado correctamente".to_string(),
            }),
        );
        assert_eq!(
            outcome,
            SubmissionOutcome::Accepted {
                message: "Mensaje enviado correctamente".to_string()
            }
        );
        assert_eq!(form.status(), ContactStatus::Success);
        assert_eq!(form.values(), &ContactFormValues::default());
    }

    #[test]
    fn completion_after_abandon_is_discarded() {
        let mut form = ContactForm::new(filled());
        let ticket = form.begin_submission("ua", now()).expect("valid");
        form.abandon();
        let outcome = form.complete_submission(ticket.id(), Err(ApiError::Timeout));
        assert_eq!(outcome, SubmissionOutcome::Discarded);
        assert_eq!(form.status(), ContactStatus::Idle);
        assert_eq!(form.values(), &filled());
    }
}
