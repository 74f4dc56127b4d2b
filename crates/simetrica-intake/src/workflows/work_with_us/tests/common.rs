use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, ApplicationGateway, SubmissionReceipt};
use crate::workflows::work_with_us::{
    ApplicationPayload, ApplicationWizard, Availability, CompletedProjectsRange, ExperienceLevel,
    ReferenceField, Specialty, TextField, WizardStep,
};

pub(super) fn fill_personal_data(wizard: &mut ApplicationWizard) {
    wizard.set_field(TextField::FullName, "Juan Pérez");
    wizard.set_field(TextField::IdentificationNumber, "12345678");
    wizard.set_field(TextField::ContactNumber, "3001234567");
    wizard.set_field(TextField::BirthDate, "1990-05-01");
    wizard.set_field(TextField::Email, "juan@example.com");
    wizard.set_department("Antioquia");
    wizard.set_field(TextField::Municipality, "Medellín");
}

pub(super) fn fill_work_information(wizard: &mut ApplicationWizard) {
    wizard.toggle_specialty(Specialty::Electricidad);
    wizard.set_experience_level(ExperienceLevel::ThreeToFive);
    wizard.set_has_certifications(true);
    wizard.set_availability(Availability::FullTime);
}

pub(super) fn fill_completed_projects(wizard: &mut ApplicationWizard) {
    wizard.set_completed_projects(CompletedProjectsRange::From10To15);
    wizard.set_field(
        TextField::ExperienceDescription,
        "Instalaciones eléctricas residenciales en el Valle de Aburrá",
    );
    wizard
        .update_reference(0, ReferenceField::Name, "María López")
        .expect("first reference row exists");
    wizard
        .update_reference(0, ReferenceField::Phone, "3109876543")
        .expect("first reference row exists");
}

/// A wizard on the final step with every gate satisfied.
pub(super) fn ready_wizard() -> ApplicationWizard {
    let mut wizard = ApplicationWizard::new();
    fill_personal_data(&mut wizard);
    wizard.advance().expect("personal data passes");
    fill_work_information(&mut wizard);
    wizard.advance().expect("work information passes");
    fill_completed_projects(&mut wizard);
    assert_eq!(wizard.step(), WizardStep::CompletedProjects);
    wizard
}

/// Gateway double that records payloads and answers with a canned result.
pub(super) struct RecordingGateway {
    calls: AtomicUsize,
    payloads: Mutex<Vec<ApplicationPayload>>,
    answer: Result<SubmissionReceipt, ApiError>,
    delay: Option<Duration>,
}

impl RecordingGateway {
    pub(super) fn accepting() -> Self {
        Self::answering(Ok(SubmissionReceipt {
            message: "Aplicación enviada exitosamente".to_string(),
        }))
    }

    pub(super) fn answering(answer: Result<SubmissionReceipt, ApiError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            answer,
            delay: None,
        }
    }

    pub(super) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn payloads(&self) -> Vec<ApplicationPayload> {
        self.payloads.lock().expect("payload mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicationGateway for RecordingGateway {
    async fn submit_application(
        &self,
        payload: &ApplicationPayload,
    ) -> Result<SubmissionReceipt, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(payload.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone()
    }
}
