//! End-to-end contact form delivery against the local stub backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use simetrica_intake::api::HttpIntakeClient;
use simetrica_intake::config::ApiConfig;
use simetrica_intake::stub::{intake_router, InMemoryIntakeStore, IntakeStore};
use simetrica_intake::workflows::contact::{
    ContactField, ContactForm, ContactFormValues, ContactStatus, ContactSubmitError,
};
use simetrica_intake::workflows::submission::{SubmissionCoordinator, SubmissionOutcome};

async fn coordinator_for(
    store: Arc<InMemoryIntakeStore>,
) -> SubmissionCoordinator<HttpIntakeClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port binds");
    let addr: SocketAddr = listener.local_addr().expect("bound address");
    tokio::spawn(async move {
        axum::serve(listener, intake_router(store))
            .await
            .expect("stub server runs");
    });

    let api = ApiConfig::new(
        format!("http://{addr}/api"),
        Duration::from_secs(5),
        "simetrica-contact-tests",
    )
    .expect("valid api config");
    let client = HttpIntakeClient::new(api.clone()).expect("client builds");
    SubmissionCoordinator::new(Arc::new(client), &api)
}

fn values() -> ContactFormValues {
    ContactFormValues {
        name: "Ana Gómez".to_string(),
        email: "ana@example.com".to_string(),
        subject: "Cotización".to_string(),
        phone: String::new(),
        message: "Quisiera una visita para remodelar el baño.".to_string(),
        honeypot: String::new(),
    }
}

#[tokio::test]
async fn contact_message_is_delivered_and_form_resets() {
    let store = Arc::new(InMemoryIntakeStore::default());
    let coordinator = coordinator_for(store.clone()).await;
    let mut form = ContactForm::new(values());

    let outcome = coordinator
        .send_contact(&mut form)
        .await
        .expect("form is valid");

    assert_eq!(
        outcome,
        SubmissionOutcome::Accepted {
            message: "Mensaje enviado correctamente".to_string()
        }
    );
    assert_eq!(form.status(), ContactStatus::Success);
    assert_eq!(form.values(), &ContactFormValues::default());

    let stored = store.contacts().expect("store readable");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].payload.subject.as_deref(), Some("Cotización"));
    assert_eq!(stored[0].payload.user_agent, "simetrica-contact-tests");
    assert_eq!(stored[0].payload.phone, None);
}

#[tokio::test]
async fn filled_honeypot_never_reaches_the_backend() {
    let store = Arc::new(InMemoryIntakeStore::default());
    let coordinator = coordinator_for(store.clone()).await;
    let mut form = ContactForm::new(values());
    form.set(ContactField::Honeypot, "http://spam.example");

    let err = coordinator
        .send_contact(&mut form)
        .await
        .expect_err("honeypot blocks submission");

    assert!(matches!(
        err,
        ContactSubmitError::Invalid {
            field: ContactField::Honeypot,
            ..
        }
    ));
    assert!(store.contacts().expect("store readable").is_empty());
    assert_eq!(form.status(), ContactStatus::Idle);
}
