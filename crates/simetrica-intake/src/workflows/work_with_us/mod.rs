//! "Trabaja con nosotros": the three-step application form for contractors.
//!
//! [`ApplicationWizard`] owns the form state and the step gates; payloads leave it only
//! through [`ApplicationWizard::begin_submission`].

pub mod catalog;
pub mod gate;
pub mod locations;
pub mod payload;
pub mod profile;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{Availability, CompletedProjectsRange, ExperienceLevel, Specialty};
pub use gate::GateFailure;
pub use locations::{departments, municipalities_for};
pub use payload::{ApplicationPayload, ReferencePayload};
pub use profile::{
    ApplicantProfile, FieldName, PhotoRejection, ProjectPhoto, ReferenceEntry, ReferenceField,
    References, SpecialtySelection,
};
pub use wizard::{
    ApplicationWizard, NavigationError, StepTransition, SubmissionStatus, SubmissionTicket,
    SubmitError, TextField, WizardError, WizardStep,
};
