//! `apply`: feeds a JSON answer file through the wizard one step at a time.

use crate::infra::{api_config, photo_from_path, print_outcome};
use clap::Args;
use serde::Deserialize;
use simetrica_intake::api::HttpIntakeClient;
use simetrica_intake::config::AppConfig;
use simetrica_intake::error::AppError;
use simetrica_intake::workflows::submission::SubmissionCoordinator;
use simetrica_intake::workflows::work_with_us::{
    ApplicationWizard, Availability, CompletedProjectsRange, ExperienceLevel, NavigationError,
    ProjectPhoto, ReferenceField, Specialty, TextField,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    /// JSON file with the applicant's answers (camelCase field names)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Project photo to attach; repeat for several
    #[arg(long = "photo")]
    pub(crate) photos: Vec<PathBuf>,
    /// Intake API base URL; defaults to INTAKE_API_URL
    #[arg(long)]
    pub(crate) api_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ApplicationAnswers {
    pub(crate) full_name: String,
    pub(crate) identification_number: String,
    pub(crate) contact_number: String,
    pub(crate) birth_date: String,
    pub(crate) email: String,
    pub(crate) department: String,
    pub(crate) municipality: String,
    pub(crate) specialties: Vec<Specialty>,
    pub(crate) other_specialty_detail: Option<String>,
    pub(crate) experience_level: Option<ExperienceLevel>,
    pub(crate) has_certifications: Option<bool>,
    pub(crate) availability: Option<Availability>,
    pub(crate) completed_projects_range: Option<CompletedProjectsRange>,
    pub(crate) construction_experience_description: Option<String>,
    pub(crate) references: Vec<ReferenceAnswer>,
    pub(crate) additional_comments: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ReferenceAnswer {
    pub(crate) name: String,
    pub(crate) phone: String,
    pub(crate) relationship: String,
}

pub(crate) fn load_answers(path: &Path) -> Result<ApplicationAnswers, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn advance_or_report(wizard: &mut ApplicationWizard) -> Result<(), AppError> {
    let step = wizard.step();
    match wizard.advance() {
        Ok(transition) => {
            println!(
                "Paso {} ({}) completo -> paso {}",
                step.number(),
                step.label(),
                transition.to.number()
            );
            Ok(())
        }
        Err(NavigationError::Blocked(failure)) => {
            println!("Paso {} ({}): {}", step.number(), step.label(), failure.message);
            Err(AppError::Input(failure.message))
        }
        Err(NavigationError::FinalStep) => Ok(()),
    }
}

/// Enter the answers step by step; stops at the first step whose gate blocks.
pub(crate) fn fill_wizard(
    wizard: &mut ApplicationWizard,
    answers: ApplicationAnswers,
    photos: Vec<ProjectPhoto>,
) -> Result<(), AppError> {
    wizard.set_field(TextField::FullName, answers.full_name);
    wizard.set_field(TextField::IdentificationNumber, answers.identification_number);
    wizard.set_field(TextField::ContactNumber, answers.contact_number);
    wizard.set_field(TextField::BirthDate, answers.birth_date);
    wizard.set_field(TextField::Email, answers.email);
    wizard.set_department(answers.department);
    wizard.set_field(TextField::Municipality, answers.municipality);
    advance_or_report(wizard)?;

    for specialty in answers.specialties {
        if !wizard.profile().specialties.contains(specialty) {
            wizard.toggle_specialty(specialty);
        }
    }
    if let Some(detail) = answers.other_specialty_detail {
        wizard.set_field(TextField::OtherSpecialtyDetail, detail);
    }
    if let Some(level) = answers.experience_level {
        wizard.set_experience_level(level);
    }
    if let Some(has_certifications) = answers.has_certifications {
        wizard.set_has_certifications(has_certifications);
    }
    if let Some(availability) = answers.availability {
        wizard.set_availability(availability);
    }
    advance_or_report(wizard)?;

    if let Some(range) = answers.completed_projects_range {
        wizard.set_completed_projects(range);
    }
    if let Some(description) = answers.construction_experience_description {
        wizard.set_field(TextField::ExperienceDescription, description);
    }
    for (index, reference) in answers.references.into_iter().enumerate() {
        if index > 0 {
            wizard.add_reference();
        }
        wizard
            .update_reference(index, ReferenceField::Name, reference.name)
            .and_then(|()| wizard.update_reference(index, ReferenceField::Phone, reference.phone))
            .and_then(|()| {
                wizard.update_reference(index, ReferenceField::Relationship, reference.relationship)
            })
            .map_err(|err| AppError::Input(err.to_string()))?;
    }
    for photo in photos {
        wizard.attach_photo(photo);
    }
    if let Some(comments) = answers.additional_comments {
        wizard.set_field(TextField::AdditionalComments, comments);
    }
    Ok(())
}

pub(crate) async fn run_apply(config: &AppConfig, args: ApplyArgs) -> Result<(), AppError> {
    let ApplyArgs {
        answers,
        photos,
        api_url,
    } = args;

    let answers = load_answers(&answers)?;
    let mut attached = Vec::with_capacity(photos.len());
    for path in photos {
        match photo_from_path(&path) {
            Ok(photo) => attached.push(photo),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping project photo");
                println!("Foto omitida: {err}");
            }
        }
    }

    let mut wizard = ApplicationWizard::new();
    fill_wizard(&mut wizard, answers, attached)?;

    let api = api_config(config, api_url)?;
    let coordinator =
        SubmissionCoordinator::new(Arc::new(HttpIntakeClient::new(api.clone())?), &api);
    let outcome = coordinator
        .submit_application(&mut wizard)
        .await
        .map_err(|err| AppError::Input(err.to_string()))?;
    print_outcome(outcome)
}
