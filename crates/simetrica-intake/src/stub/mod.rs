//! Local stand-in for the intake endpoints, used by the CLI and end-to-end tests.
//!
//! It validates with the same rules as the forms, so a request that passes the wizard is
//! accepted here and a hand-crafted one that skips it is rejected the way the real backend
//! would.

pub mod router;
pub mod store;

pub use router::{application_errors, intake_router};
pub use store::{
    InMemoryIntakeStore, IntakeStore, StoreError, StoredApplication, StoredContact, SubmissionId,
};
