use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::{Availability, CompletedProjectsRange, ExperienceLevel, Specialty};
use super::gate::{self, GateFailure};
use super::profile::{ApplicantProfile, FieldName, ProjectPhoto};
use crate::workflows::validation::{parse_iso_date, DATE_MESSAGE};

/// Body of `POST /work-with-us`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub full_name: String,
    pub identification_number: String,
    pub contact_number: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub department: String,
    pub municipality: String,
    pub specialties: Vec<Specialty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_specialty_detail: Option<String>,
    pub experience_level: ExperienceLevel,
    pub has_certifications: bool,
    pub availability: Availability,
    pub completed_projects_range: CompletedProjectsRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_experience_description: Option<String>,
    #[serde(default)]
    pub project_photos: Vec<ProjectPhoto>,
    pub references: Vec<ReferencePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePayload {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn missing(field: FieldName) -> GateFailure {
    GateFailure::new(field, format!("falta el campo {field}"))
}

impl ApplicationPayload {
    /// Runs every step gate, then maps the profile onto the backend's field names.
    /// Reference rows are sent as entered, blank rows included.
    pub fn from_profile(profile: &ApplicantProfile) -> Result<Self, GateFailure> {
        gate::check_all(profile)?;

        let birth_date = parse_iso_date(&profile.birth_date)
            .ok_or_else(|| GateFailure::new(FieldName::BirthDate, DATE_MESSAGE))?;

        Ok(Self {
            full_name: trimmed(&profile.full_name),
            identification_number: trimmed(&profile.identification_number),
            contact_number: trimmed(&profile.contact_number),
            birth_date,
            email: trimmed(&profile.email),
            department: profile.department.clone(),
            municipality: profile.municipality.clone(),
            specialties: profile.specialties.selected(),
            other_specialty_detail: profile.specialties.other_detail().map(trimmed),
            experience_level: profile
                .experience_level
                .ok_or_else(|| missing(FieldName::ExperienceLevel))?,
            has_certifications: profile
                .has_certifications
                .ok_or_else(|| missing(FieldName::Certifications))?,
            availability: profile
                .availability
                .ok_or_else(|| missing(FieldName::Availability))?,
            completed_projects_range: profile
                .completed_projects
                .ok_or_else(|| missing(FieldName::CompletedProjects))?,
            construction_experience_description: non_empty(&profile.experience_description),
            project_photos: profile.project_photos.clone(),
            references: profile
                .references
                .iter()
                .map(|reference| ReferencePayload {
                    name: trimmed(&reference.name),
                    phone: trimmed(&reference.phone),
                    relationship: non_empty(&reference.relationship),
                })
                .collect(),
            additional_comments: non_empty(&profile.additional_comments),
        })
    }
}
