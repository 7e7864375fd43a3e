//! Workspace signup utility for ProjectHub
//!
//! Provisions a workspace through the configured Directory Service, the same
//! way the signup page does: the subdomain is checked for availability first,
//! then the form is submitted and the workspace URL printed.
//!
//! Usage:
//!   cargo run --bin projecthub-signup -- <subdomain> <company> <admin-name> <admin-email>

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use projecthub_api::{
    config::Config,
    provisioning::{FlowState, FormField, Navigator, ProvisioningFlow},
    telemetry, AppState,
};
use projecthub_shared::SubdomainStatus;

/// Prints the redirect target instead of opening it
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate(&self, url: &str) {
        println!("Redirecting to {}", url);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let [subdomain, company_name, admin_name, admin_email] = args.as_slice() else {
        eprintln!("Usage: projecthub-signup <subdomain> <company> <admin-name> <admin-email>");
        process::exit(2);
    };

    let config = Config::from_env().context("Failed to load configuration")?;
    let settings = config.flow_settings();
    let state = AppState::new(config).context("Failed to create directory client")?;
    let flow = ProvisioningFlow::new(state.directory, Arc::new(StdoutNavigator), settings);

    let mut updates = flow.checker().subscribe();
    flow.set_subdomain(subdomain)?;
    flow.set_field(FormField::CompanyName, company_name)?;
    flow.set_field(FormField::AdminName, admin_name)?;
    flow.set_field(FormField::AdminEmail, admin_email)?;

    let candidate = updates
        .wait_for(|c| c.status != SubdomainStatus::Checking)
        .await
        .context("Availability checker stopped")?
        .clone();
    println!("Subdomain '{}': {}", candidate.normalized, candidate.status);

    if candidate.status == SubdomainStatus::Taken {
        eprintln!("Error: This subdomain is already taken");
        process::exit(1);
    }

    match flow.submit().await? {
        FlowState::Succeeded(result) => {
            println!("\n===========================================");
            println!("Workspace created: {}", result.company_name);
            println!("===========================================");
            println!("{}", result.workspace_url);
            println!("===========================================\n");

            if let Some(redirect) = flow.take_redirect() {
                redirect.await.context("Redirect task failed")?;
            }
            Ok(())
        }
        _ => {
            let form = flow.form();
            for (field, messages) in &form.field_errors {
                for message in messages {
                    eprintln!("{}: {}", field, message);
                }
            }
            if let Some(message) = form.general_error {
                eprintln!("Error: {}", message);
            }
            process::exit(1);
        }
    }
}
