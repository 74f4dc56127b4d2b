use crate::infra::print_outcome;
use chrono::Local;
use simetrica_intake::api::HttpIntakeClient;
use simetrica_intake::config::{ApiConfig, AppConfig};
use simetrica_intake::error::AppError;
use simetrica_intake::stub::{intake_router, InMemoryIntakeStore, IntakeStore};
use simetrica_intake::workflows::contact::{ContactForm, ContactFormValues};
use simetrica_intake::workflows::submission::SubmissionCoordinator;
use simetrica_intake::workflows::work_with_us::{
    ApplicationWizard, Availability, CompletedProjectsRange, ExperienceLevel, NavigationError,
    ReferenceField, Specialty, TextField,
};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run_demo(config: &AppConfig) -> Result<(), AppError> {
    let store = Arc::new(InMemoryIntakeStore::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = intake_router(store.clone());
    let server = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            warn!(error = %err, "demo backend stopped");
        }
    });
    info!(%addr, "demo backend listening");

    let api = ApiConfig::new(
        format!("http://{addr}/api"),
        config.api.timeout,
        config.api.user_agent.clone(),
    )?;
    let coordinator =
        SubmissionCoordinator::new(Arc::new(HttpIntakeClient::new(api.clone())?), &api);

    println!("Simetrica intake demo (backend on http://{addr})");
    println!("\nTrabaja con nosotros");

    let mut wizard = ApplicationWizard::new();
    wizard.set_field(TextField::FullName, "Juan Pérez");
    wizard.set_field(TextField::IdentificationNumber, "1234567");
    wizard.set_field(TextField::ContactNumber, "12345");
    wizard.set_field(TextField::BirthDate, "1990-01-01");
    wizard.set_field(TextField::Email, "juan@example.com");
    wizard.set_department("Valle del Cauca");
    println!(
        "- Valle del Cauca ofrece {} municipios",
        wizard.municipalities().len()
    );
    wizard.set_field(TextField::Municipality, "Cali");

    if let Err(NavigationError::Blocked(failure)) = wizard.advance() {
        println!("- Paso 1 bloqueado: {}", failure.message);
    }
    wizard.set_field(TextField::ContactNumber, "3001234567");
    step(&mut wizard)?;

    wizard.toggle_specialty(Specialty::ObraNegra);
    wizard.toggle_specialty(Specialty::EstructurasMetalicas);
    wizard.set_experience_level(ExperienceLevel::MoreThanTen);
    wizard.set_has_certifications(true);
    wizard.set_availability(Availability::FullTime);
    step(&mut wizard)?;

    wizard.set_completed_projects(CompletedProjectsRange::From20To25);
    wizard.set_field(
        TextField::ExperienceDescription,
        "Cimentaciones y estructuras para vivienda de interés social",
    );
    wizard
        .update_reference(0, ReferenceField::Name, "Constructora del Pacífico")
        .and_then(|()| wizard.update_reference(0, ReferenceField::Phone, "6023334455"))
        .map_err(|err| AppError::Input(err.to_string()))?;

    let outcome = coordinator
        .submit_application(&mut wizard)
        .await
        .map_err(|err| AppError::Input(err.to_string()))?;
    print!("- ");
    print_outcome(outcome)?;

    println!("\nContacto");
    let mut form = ContactForm::new(ContactFormValues {
        name: "Ana Gómez".to_string(),
        email: "ana@example.com".to_string(),
        subject: "Remodelación".to_string(),
        phone: "3104445566".to_string(),
        message: "Quisiera cotizar la remodelación de mi cocina.".to_string(),
        honeypot: String::new(),
    });
    let outcome = coordinator
        .send_contact(&mut form)
        .await
        .map_err(|err| AppError::Input(err.to_string()))?;
    print!("- ");
    print_outcome(outcome)?;

    println!("\nRecibido por el backend");
    for stored in store.applications()? {
        println!(
            "- {} | {} | {} ({}) | {}",
            stored.id,
            stored.payload.full_name,
            stored.payload.municipality,
            stored.payload.department,
            stored
                .received_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        );
    }
    for stored in store.contacts()? {
        println!(
            "- {} | {} <{}> | {}",
            stored.id,
            stored.payload.name,
            stored.payload.email,
            stored.payload.subject.as_deref().unwrap_or("(sin asunto)")
        );
    }

    server.abort();
    Ok(())
}

fn step(wizard: &mut ApplicationWizard) -> Result<(), AppError> {
    let transition = wizard
        .advance()
        .map_err(|err| AppError::Input(err.to_string()))?;
    println!(
        "- {} completo, sigue {}",
        transition.from.label(),
        transition.to.label()
    );
    Ok(())
}
