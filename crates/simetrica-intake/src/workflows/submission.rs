//! Submission coordination shared by both public forms.
//!
//! A form hands out a [`Ticket`] when submission starts and flips into its in-flight
//! state; the coordinator sends the ticket's payload through a gateway under a timeout and
//! feeds the result back. A form only accepts the result for the ticket it is still
//! waiting on, so answers that arrive after a reset are dropped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::api::{ApiError, ApplicationGateway, ContactGateway, SubmissionReceipt};
use crate::config::ApiConfig;
use crate::workflows::contact::{ContactForm, ContactPayload, ContactSubmitError};
use crate::workflows::work_with_us::{ApplicationPayload, ApplicationWizard, SubmitError};

/// Identifies one submission attempt of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicketId(u64);

#[derive(Debug, Clone, Default)]
pub(crate) struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub(crate) fn issue<P>(&mut self, payload: P) -> Ticket<P> {
        self.last += 1;
        Ticket {
            id: TicketId(self.last),
            payload,
        }
    }
}

/// Payload frozen at the moment a submission started.
#[derive(Debug, Clone)]
pub struct Ticket<P> {
    id: TicketId,
    payload: P,
}

impl<P> Ticket<P> {
    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted { message: String },
    Failed { message: String },
    /// The ticket was no longer outstanding (form reset or abandoned meanwhile).
    Discarded,
}

/// Sends form payloads through a gateway, one request per submit, never retried.
pub struct SubmissionCoordinator<G> {
    gateway: Arc<G>,
    timeout: Duration,
    user_agent: String,
}

impl<G> SubmissionCoordinator<G> {
    pub fn new(gateway: Arc<G>, api: &ApiConfig) -> Self {
        Self::with_timeout(gateway, api.timeout, api.user_agent.clone())
    }

    pub fn with_timeout(gateway: Arc<G>, timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            gateway,
            timeout,
            user_agent: user_agent.into(),
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    async fn bounded<F>(&self, request: F) -> Result<SubmissionReceipt, ApiError>
    where
        F: Future<Output = Result<SubmissionReceipt, ApiError>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "submission timed out");
                Err(ApiError::Timeout)
            }
        }
    }
}

impl<G> SubmissionCoordinator<G>
where
    G: ApplicationGateway,
{
    /// Send an already issued ticket, for hosts that complete the wizard themselves.
    pub async fn dispatch_application(
        &self,
        ticket: &Ticket<ApplicationPayload>,
    ) -> Result<SubmissionReceipt, ApiError> {
        info!(
            specialties = ticket.payload().specialties.len(),
            references = ticket.payload().references.len(),
            photos = ticket.payload().project_photos.len(),
            "submitting work-with-us application"
        );
        self.bounded(self.gateway.submit_application(ticket.payload()))
            .await
    }

    pub async fn submit_application(
        &self,
        wizard: &mut ApplicationWizard,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let ticket = wizard.begin_submission()?;
        let result = self.dispatch_application(&ticket).await;
        Ok(wizard.complete_submission(ticket.id(), result))
    }
}

impl<G> SubmissionCoordinator<G>
where
    G: ContactGateway,
{
    pub async fn dispatch_contact(
        &self,
        ticket: &Ticket<ContactPayload>,
    ) -> Result<SubmissionReceipt, ApiError> {
        info!("sending contact message");
        self.bounded(self.gateway.send_contact(ticket.payload())).await
    }

    pub async fn send_contact(
        &self,
        form: &mut ContactForm,
    ) -> Result<SubmissionOutcome, ContactSubmitError> {
        let ticket = form.begin_submission(&self.user_agent, Utc::now())?;
        let result = self.dispatch_contact(&ticket).await;
        Ok(form.complete_submission(ticket.id(), result))
    }
}
