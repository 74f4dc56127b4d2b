use crate::answers::{run_apply, ApplyArgs};
use crate::demo::run_demo;
use crate::infra::{api_config, print_outcome};
use crate::server;
use clap::{Args, Parser, Subcommand};
use simetrica_intake::api::HttpIntakeClient;
use simetrica_intake::config::AppConfig;
use simetrica_intake::error::AppError;
use simetrica_intake::telemetry;
use simetrica_intake::workflows::contact::{ContactForm, ContactFormValues};
use simetrica_intake::workflows::submission::SubmissionCoordinator;
use simetrica_intake::workflows::work_with_us::{departments, municipalities_for};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Simetrica Intake",
    about = "Run the Simetrica intake stub and submit work-with-us applications or contact messages",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the local intake backend (default command)
    Serve(ServeArgs),
    /// Walk the work-with-us wizard with answers from a JSON file and submit it
    Apply(ApplyArgs),
    /// Send a message through the contact form
    Contact(ContactArgs),
    /// List departments, or the municipalities of one department
    Departments {
        /// Department whose municipalities should be listed
        name: Option<String>,
    },
    /// Start a throwaway backend and walk both forms against it
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ContactArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) message: String,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) subject: Option<String>,
    /// Intake API base URL; defaults to INTAKE_API_URL
    #[arg(long)]
    pub(crate) api_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Apply(args) => run_apply(&config, args).await,
        Command::Contact(args) => run_contact(&config, args).await,
        Command::Departments { name } => list_departments(name.as_deref()),
        Command::Demo => run_demo(&config).await,
    }
}

async fn run_contact(config: &AppConfig, args: ContactArgs) -> Result<(), AppError> {
    let api = api_config(config, args.api_url)?;
    let coordinator =
        SubmissionCoordinator::new(Arc::new(HttpIntakeClient::new(api.clone())?), &api);

    let mut form = ContactForm::new(ContactFormValues {
        name: args.name,
        email: args.email,
        subject: args.subject.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        message: args.message,
        honeypot: String::new(),
    });

    let outcome = coordinator
        .send_contact(&mut form)
        .await
        .map_err(|err| AppError::Input(err.to_string()))?;
    print_outcome(outcome)
}

fn list_departments(name: Option<&str>) -> Result<(), AppError> {
    match name {
        Some(name) => {
            let municipalities = municipalities_for(name);
            if municipalities.is_empty() {
                return Err(AppError::Input(format!("unknown department '{name}'")));
            }
            println!("{name} ({} municipios)", municipalities.len());
            for municipality in municipalities {
                println!("  - {municipality}");
            }
        }
        None => {
            for department in departments() {
                println!(
                    "{department} ({} municipios)",
                    municipalities_for(department).len()
                );
            }
        }
    }
    Ok(())
}
