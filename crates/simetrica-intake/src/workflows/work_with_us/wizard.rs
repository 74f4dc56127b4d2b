use std::collections::BTreeMap;

use tracing::debug;

use super::catalog::{Availability, CompletedProjectsRange, ExperienceLevel, Specialty};
use super::gate::{self, GateFailure};
use super::locations::municipalities_for;
use super::payload::ApplicationPayload;
use super::profile::{ApplicantProfile, FieldName, ProjectPhoto, ReferenceField};
use crate::api::{ApiError, SubmissionReceipt};
use crate::workflows::submission::{SubmissionOutcome, Ticket, TicketCounter, TicketId};
use crate::workflows::validation::{
    validate_contact_number, validate_email, validate_identification, FieldVerdict,
};

/// The three screens of the application form, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WizardStep {
    #[default]
    PersonalData,
    WorkInformation,
    CompletedProjects,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::PersonalData,
        WizardStep::WorkInformation,
        WizardStep::CompletedProjects,
    ];

    pub const fn number(self) -> u8 {
        match self {
            WizardStep::PersonalData => 1,
            WizardStep::WorkInformation => 2,
            WizardStep::CompletedProjects => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::PersonalData => "Datos personales",
            WizardStep::WorkInformation => "Información laboral",
            WizardStep::CompletedProjects => "Proyectos realizados",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            WizardStep::PersonalData => Some(WizardStep::WorkInformation),
            WizardStep::WorkInformation => Some(WizardStep::CompletedProjects),
            WizardStep::CompletedProjects => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            WizardStep::PersonalData => None,
            WizardStep::WorkInformation => Some(WizardStep::PersonalData),
            WizardStep::CompletedProjects => Some(WizardStep::WorkInformation),
        }
    }
}

/// A completed move between steps. Hosts scroll the viewport back to the top on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTransition {
    pub from: WizardStep,
    pub to: WizardStep,
}

/// Free-text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FullName,
    IdentificationNumber,
    ContactNumber,
    BirthDate,
    Email,
    Department,
    Municipality,
    OtherSpecialtyDetail,
    ExperienceDescription,
    AdditionalComments,
}

impl TextField {
    pub const fn field(self) -> FieldName {
        match self {
            TextField::FullName => FieldName::FullName,
            TextField::IdentificationNumber => FieldName::IdentificationNumber,
            TextField::ContactNumber => FieldName::ContactNumber,
            TextField::BirthDate => FieldName::BirthDate,
            TextField::Email => FieldName::Email,
            TextField::Department => FieldName::Department,
            TextField::Municipality => FieldName::Municipality,
            TextField::OtherSpecialtyDetail => FieldName::OtherSpecialtyDetail,
            TextField::ExperienceDescription => FieldName::ExperienceDescription,
            TextField::AdditionalComments => FieldName::AdditionalComments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error(transparent)]
    Blocked(#[from] GateFailure),
    #[error("already on the last step; submit instead")]
    FinalStep,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("submission is only possible from the last step (currently on step {})", .step.number())]
    NotOnFinalStep { step: WizardStep },
    #[error(transparent)]
    Blocked(#[from] GateFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("reference {index} does not exist")]
    UnknownReference { index: usize },
}

/// Where the last submission attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        message: String,
    },
    Failed {
        message: String,
    },
}

pub type SubmissionTicket = Ticket<ApplicationPayload>;

/// Owned state of one application form instance.
#[derive(Debug, Clone, Default)]
pub struct ApplicationWizard {
    profile: ApplicantProfile,
    errors: BTreeMap<FieldName, String>,
    step: WizardStep,
    municipalities: &'static [&'static str],
    status: SubmissionStatus,
    in_flight: Option<TicketId>,
    tickets: TicketCounter,
}

impl ApplicationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &ApplicantProfile {
        &self.profile
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn errors(&self) -> &BTreeMap<FieldName, String> {
        &self.errors
    }

    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Municipalities offered for the selected department.
    pub fn municipalities(&self) -> &'static [&'static str] {
        self.municipalities
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// `true` while the submit control must stay disabled.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn set_field(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        let name = field.field();
        match field {
            TextField::Department => return self.set_department(value),
            TextField::FullName => self.profile.full_name = value,
            TextField::IdentificationNumber => self.profile.identification_number = value,
            TextField::ContactNumber => self.profile.contact_number = value,
            TextField::BirthDate => self.profile.birth_date = value,
            TextField::Email => self.profile.email = value,
            TextField::Municipality => self.profile.municipality = value,
            TextField::OtherSpecialtyDetail => {
                if !self.profile.specialties.set_other_detail(value) {
                    debug!("ignoring other-specialty detail while OTRO is not selected");
                }
            }
            TextField::ExperienceDescription => self.profile.experience_description = value,
            TextField::AdditionalComments => self.profile.additional_comments = value,
        }

        if name.validates_live() {
            self.revalidate_live(name);
        } else {
            self.errors.remove(&name);
        }
    }

    fn revalidate_live(&mut self, field: FieldName) {
        let value = match field {
            FieldName::IdentificationNumber => &self.profile.identification_number,
            FieldName::ContactNumber => &self.profile.contact_number,
            FieldName::Email => &self.profile.email,
            _ => return,
        };
        if value.is_empty() {
            self.errors.remove(&field);
            return;
        }

        let verdict = match field {
            FieldName::IdentificationNumber => validate_identification(value),
            FieldName::ContactNumber => validate_contact_number(value),
            _ => validate_email(value),
        };
        match verdict {
            FieldVerdict::Valid => {
                self.errors.remove(&field);
            }
            FieldVerdict::Invalid(message) => {
                self.errors.insert(field, message);
            }
        }
    }

    /// Selecting a department clears the municipality and reloads the municipality list.
    pub fn set_department(&mut self, department: impl Into<String>) {
        self.profile.department = department.into();
        self.profile.municipality.clear();
        self.municipalities = municipalities_for(&self.profile.department);
        self.errors.remove(&FieldName::Department);
        self.errors.remove(&FieldName::Municipality);
    }

    pub fn toggle_specialty(&mut self, specialty: Specialty) {
        self.profile.specialties.toggle(specialty);
        self.errors.remove(&FieldName::Specialties);
        if !self.profile.specialties.contains(Specialty::Otro) {
            self.errors.remove(&FieldName::OtherSpecialtyDetail);
        }
    }

    pub fn set_experience_level(&mut self, level: ExperienceLevel) {
        self.profile.experience_level = Some(level);
        self.errors.remove(&FieldName::ExperienceLevel);
    }

    pub fn set_has_certifications(&mut self, has_certifications: bool) {
        self.profile.has_certifications = Some(has_certifications);
        self.errors.remove(&FieldName::Certifications);
    }

    pub fn set_availability(&mut self, availability: Availability) {
        self.profile.availability = Some(availability);
        self.errors.remove(&FieldName::Availability);
    }

    pub fn set_completed_projects(&mut self, range: CompletedProjectsRange) {
        self.profile.completed_projects = Some(range);
        self.errors.remove(&FieldName::CompletedProjects);
    }

    pub fn attach_photo(&mut self, photo: ProjectPhoto) {
        self.profile.project_photos.push(photo);
        self.errors.remove(&FieldName::ProjectPhotos);
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<ProjectPhoto> {
        (index < self.profile.project_photos.len())
            .then(|| self.profile.project_photos.remove(index))
    }

    pub fn add_reference(&mut self) {
        self.profile.references.push_blank();
    }

    pub fn update_reference(
        &mut self,
        index: usize,
        field: ReferenceField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        let entry = self
            .profile
            .references
            .get_mut(index)
            .ok_or(WizardError::UnknownReference { index })?;
        let value = value.into();
        match field {
            ReferenceField::Name => entry.name = value,
            ReferenceField::Phone => entry.phone = value,
            ReferenceField::Relationship => entry.relationship = value,
        }
        self.errors.remove(&FieldName::References);
        Ok(())
    }

    /// Gate the current step and move forward when it passes.
    pub fn advance(&mut self) -> Result<StepTransition, NavigationError> {
        let next = self.step.next().ok_or(NavigationError::FinalStep)?;
        self.run_gate(self.step)?;
        Ok(self.move_to(next))
    }

    /// Backward moves never need the gate.
    pub fn retreat(&mut self) -> Option<StepTransition> {
        let previous = self.step.previous()?;
        Some(self.move_to(previous))
    }

    fn move_to(&mut self, to: WizardStep) -> StepTransition {
        let transition = StepTransition {
            from: self.step,
            to,
        };
        self.step = to;
        debug!(from = transition.from.number(), to = to.number(), "wizard step changed");
        transition
    }

    fn run_gate(&mut self, step: WizardStep) -> Result<(), GateFailure> {
        for field in gate::step_fields(step) {
            self.errors.remove(field);
        }
        gate::check_step(step, &self.profile).map_err(|failure| {
            debug!(step = step.number(), field = %failure.field, "step gate blocked navigation");
            self.errors.insert(failure.field, failure.message.clone());
            failure
        })
    }

    /// Freeze the payload and mark the form as submitting.
    ///
    /// Every step gate runs again, so edits made after leaving a step cannot reach the
    /// network unvalidated.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SubmitError> {
        if self.in_flight.is_some() {
            return Err(SubmitError::InFlight);
        }
        if self.step.next().is_some() {
            return Err(SubmitError::NotOnFinalStep { step: self.step });
        }
        for step in WizardStep::ALL {
            self.run_gate(step)?;
        }
        let payload = ApplicationPayload::from_profile(&self.profile)?;

        let ticket = self.tickets.issue(payload);
        self.in_flight = Some(ticket.id());
        self.status = SubmissionStatus::Submitting;
        Ok(ticket)
    }

    /// Apply the backend's answer. Success clears the form; failure keeps every value.
    pub fn complete_submission(
        &mut self,
        ticket: TicketId,
        result: Result<SubmissionReceipt, ApiError>,
    ) -> SubmissionOutcome {
        if self.in_flight != Some(ticket) {
            debug!("discarding completion for a submission that is no longer outstanding");
            return SubmissionOutcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(receipt) => {
                self.clear_form();
                self.status = SubmissionStatus::Succeeded {
                    message: receipt.message.clone(),
                };
                SubmissionOutcome::Accepted {
                    message: receipt.message,
                }
            }
            Err(err) => {
                let message = err.user_message();
                self.status = SubmissionStatus::Failed {
                    message: message.clone(),
                };
                SubmissionOutcome::Failed { message }
            }
        }
    }

    /// Abandon the form: values are dropped and any outstanding submission is forgotten.
    pub fn reset(&mut self) {
        self.clear_form();
        self.in_flight = None;
        self.status = SubmissionStatus::Idle;
    }

    fn clear_form(&mut self) {
        self.profile = ApplicantProfile::default();
        self.errors.clear();
        self.step = WizardStep::PersonalData;
        self.municipalities = &[];
    }
}
