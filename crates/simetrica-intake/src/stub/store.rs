use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::contact::ContactPayload;
use crate::workflows::work_with_us::ApplicationPayload;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApplication {
    pub id: SubmissionId,
    pub received_at: DateTime<Utc>,
    pub payload: ApplicationPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredContact {
    pub id: SubmissionId,
    pub received_at: DateTime<Utc>,
    pub payload: ContactPayload,
}

/// Storage for accepted submissions, so the router can be exercised against any backend.
pub trait IntakeStore: Send + Sync {
    fn save_application(
        &self,
        payload: ApplicationPayload,
    ) -> Result<StoredApplication, StoreError>;
    fn save_contact(&self, payload: ContactPayload) -> Result<StoredContact, StoreError>;
    fn applications(&self) -> Result<Vec<StoredApplication>, StoreError>;
    fn contacts(&self) -> Result<Vec<StoredContact>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("an application for identification {identification} already exists")]
    DuplicateApplication { identification: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store; ids are sequential per store (`app-000001`, `msg-000001`).
#[derive(Debug, Default, Clone)]
pub struct InMemoryIntakeStore {
    applications: Arc<Mutex<Vec<StoredApplication>>>,
    contacts: Arc<Mutex<Vec<StoredContact>>>,
    application_sequence: Arc<AtomicU64>,
    contact_sequence: Arc<AtomicU64>,
}

fn next_id(sequence: &AtomicU64, prefix: &str) -> SubmissionId {
    let id = sequence.fetch_add(1, Ordering::Relaxed) + 1;
    SubmissionId(format!("{prefix}-{id:06}"))
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
}

impl IntakeStore for InMemoryIntakeStore {
    fn save_application(
        &self,
        payload: ApplicationPayload,
    ) -> Result<StoredApplication, StoreError> {
        let mut guard = lock(&self.applications)?;
        if guard
            .iter()
            .any(|stored| stored.payload.identification_number == payload.identification_number)
        {
            return Err(StoreError::DuplicateApplication {
                identification: payload.identification_number,
            });
        }
        let record = StoredApplication {
            id: next_id(&self.application_sequence, "app"),
            received_at: Utc::now(),
            payload,
        };
        guard.push(record.clone());
        Ok(record)
    }

    fn save_contact(&self, payload: ContactPayload) -> Result<StoredContact, StoreError> {
        let record = StoredContact {
            id: next_id(&self.contact_sequence, "msg"),
            received_at: Utc::now(),
            payload,
        };
        lock(&self.contacts)?.push(record.clone());
        Ok(record)
    }

    fn applications(&self) -> Result<Vec<StoredApplication>, StoreError> {
        Ok(lock(&self.applications)?.clone())
    }

    fn contacts(&self) -> Result<Vec<StoredContact>, StoreError> {
        Ok(lock(&self.contacts)?.clone())
    }
}
