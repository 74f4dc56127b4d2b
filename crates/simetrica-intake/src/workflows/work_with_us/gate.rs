//! Step gate: decides whether the wizard may leave a step.
//!
//! Checks run in a fixed order and stop at the first failure, so the applicant sees a
//! single blocking notice at a time.

use super::locations::{is_known_department, municipalities_for};
use super::profile::{ApplicantProfile, FieldName};
use super::wizard::WizardStep;
use crate::workflows::validation::{
    validate_contact_number, validate_email, validate_identification, validate_iso_date,
    validate_max_length, validate_required, FieldVerdict,
};

pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_COMMENTS_CHARS: usize = 1000;

/// The first check that failed for a step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GateFailure {
    pub field: FieldName,
    pub message: String,
}

impl GateFailure {
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn ensure(field: FieldName, verdict: FieldVerdict) -> Result<(), GateFailure> {
    match verdict {
        FieldVerdict::Valid => Ok(()),
        FieldVerdict::Invalid(message) => Err(GateFailure::new(field, message)),
    }
}

fn ensure_that(field: FieldName, condition: bool, message: &str) -> Result<(), GateFailure> {
    if condition {
        Ok(())
    } else {
        Err(GateFailure::new(field, message))
    }
}

/// Fields owned by a step, in gate order.
pub fn step_fields(step: WizardStep) -> &'static [FieldName] {
    match step {
        WizardStep::PersonalData => &[
            FieldName::FullName,
            FieldName::IdentificationNumber,
            FieldName::ContactNumber,
            FieldName::BirthDate,
            FieldName::Email,
            FieldName::Department,
            FieldName::Municipality,
        ],
        WizardStep::WorkInformation => &[
            FieldName::Specialties,
            FieldName::OtherSpecialtyDetail,
            FieldName::ExperienceLevel,
            FieldName::Certifications,
            FieldName::Availability,
        ],
        WizardStep::CompletedProjects => &[
            FieldName::CompletedProjects,
            FieldName::ExperienceDescription,
            FieldName::ProjectPhotos,
            FieldName::References,
            FieldName::AdditionalComments,
        ],
    }
}

pub fn check_step(step: WizardStep, profile: &ApplicantProfile) -> Result<(), GateFailure> {
    match step {
        WizardStep::PersonalData => check_personal_data(profile),
        WizardStep::WorkInformation => check_work_information(profile),
        WizardStep::CompletedProjects => check_completed_projects(profile),
    }
}

/// Runs every step gate in order, as done right before submission.
pub fn check_all(profile: &ApplicantProfile) -> Result<(), GateFailure> {
    WizardStep::ALL
        .into_iter()
        .try_for_each(|step| check_step(step, profile))
}

fn check_personal_data(profile: &ApplicantProfile) -> Result<(), GateFailure> {
    ensure(
        FieldName::FullName,
        validate_required(&profile.full_name, "Por favor ingrese su nombre completo"),
    )?;
    ensure(
        FieldName::IdentificationNumber,
        validate_identification(&profile.identification_number),
    )?;
    ensure(
        FieldName::ContactNumber,
        validate_contact_number(&profile.contact_number),
    )?;
    ensure(
        FieldName::BirthDate,
        validate_required(&profile.birth_date, "Por favor ingrese su fecha de nacimiento"),
    )?;
    ensure(FieldName::BirthDate, validate_iso_date(&profile.birth_date))?;
    ensure(FieldName::Email, validate_email(&profile.email))?;
    ensure(
        FieldName::Department,
        validate_required(&profile.department, "Por favor seleccione un departamento"),
    )?;
    ensure_that(
        FieldName::Department,
        is_known_department(&profile.department),
        "Por favor seleccione un departamento de la lista",
    )?;
    ensure(
        FieldName::Municipality,
        validate_required(&profile.municipality, "Por favor seleccione un municipio"),
    )?;
    ensure_that(
        FieldName::Municipality,
        municipalities_for(&profile.department)
            .iter()
            .any(|municipality| *municipality == profile.municipality),
        "El municipio no pertenece al departamento seleccionado",
    )
}

fn check_work_information(profile: &ApplicantProfile) -> Result<(), GateFailure> {
    ensure_that(
        FieldName::Specialties,
        !profile.specialties.is_empty(),
        "Por favor seleccione al menos una especialidad",
    )?;
    if let Some(detail) = profile.specialties.other_detail() {
        ensure(
            FieldName::OtherSpecialtyDetail,
            validate_required(detail, "Por favor describa su otra especialidad"),
        )?;
    }
    ensure_that(
        FieldName::ExperienceLevel,
        profile.experience_level.is_some(),
        "Por favor indique sus años de experiencia",
    )?;
    ensure_that(
        FieldName::Certifications,
        profile.has_certifications.is_some(),
        "Por favor indique si cuenta con certificaciones",
    )?;
    ensure_that(
        FieldName::Availability,
        profile.availability.is_some(),
        "Por favor indique su disponibilidad de trabajo",
    )
}

fn check_completed_projects(profile: &ApplicantProfile) -> Result<(), GateFailure> {
    ensure_that(
        FieldName::CompletedProjects,
        profile.completed_projects.is_some(),
        "Por favor seleccione la cantidad de proyectos realizados",
    )?;
    ensure(
        FieldName::ExperienceDescription,
        validate_max_length(
            &profile.experience_description,
            MAX_DESCRIPTION_CHARS,
            "La descripción de experiencia no puede superar 2000 caracteres",
        ),
    )?;
    for (position, reference) in profile.references.iter().enumerate() {
        let has_name = !reference.name.trim().is_empty();
        let has_phone = !reference.phone.trim().is_empty();
        if has_name != has_phone {
            return Err(GateFailure::new(
                FieldName::References,
                format!(
                    "Complete el nombre y el teléfono de la referencia {}",
                    position + 1
                ),
            ));
        }
    }
    ensure(
        FieldName::AdditionalComments,
        validate_max_length(
            &profile.additional_comments,
            MAX_COMMENTS_CHARS,
            "Los comentarios no pueden superar 1000 caracteres",
        ),
    )
}
