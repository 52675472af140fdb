//! Headless one-shot commands.
//!
//! Each command hosts the flow controller for a single submission and prints
//! the collected events, mirroring what the interactive screen does live.

use crate::cli::{Cli, OutputFormat};
use anyhow::Result;
use shopsense_core::api::{self, ApiClient};
use shopsense_core::auth::{
    AuthFlowController, AuthFlowEvent, Destination, EventCallback, FlowMode, SessionStore,
};
use std::sync::{Arc, Mutex};

/// Events collected from a single hosted submission.
#[derive(Default)]
struct Outcome {
    feedback: Vec<String>,
    destination: Option<Destination>,
}

fn hosted_controller(session: SessionStore) -> (AuthFlowController, Arc<Mutex<Outcome>>) {
    let outcome = Arc::new(Mutex::new(Outcome::default()));

    let sink = outcome.clone();
    let events: EventCallback = Box::new(move |event| {
        let mut outcome = sink.lock().unwrap();
        match event {
            AuthFlowEvent::Feedback(msg) => outcome.feedback.push(msg),
            AuthFlowEvent::Navigate(destination) => outcome.destination = Some(destination),
            AuthFlowEvent::ModeChanged(_) => {}
        }
    });

    let controller = AuthFlowController::new(Arc::new(ApiClient::new()), session, Some(events));
    (controller, outcome)
}

fn destination_label(destination: Destination) -> &'static str {
    match destination {
        Destination::AdminHome => "admin_home",
        Destination::DefaultHome => "default_home",
    }
}

pub async fn cmd_login(cli: &Cli, email: &str, password: &str) -> Result<()> {
    let session = SessionStore::global();
    let (controller, outcome) = hosted_controller(session.clone());

    controller.submit_login(email, password).await;

    let outcome = outcome.lock().unwrap();
    let signed_in = session.is_signed_in();

    match cli.format {
        OutputFormat::Text => {
            for msg in &outcome.feedback {
                println!("{}", msg);
            }
            match outcome.destination {
                Some(Destination::AdminHome) => println!("Destination: admin dashboard"),
                Some(Destination::DefaultHome) => println!("Destination: storefront"),
                None => {}
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "signed_in": signed_in,
                    "destination": outcome.destination.map(destination_label),
                    "feedback": outcome.feedback,
                })
            );
        }
    }

    if !signed_in {
        std::process::exit(1);
    }
    Ok(())
}

pub async fn cmd_signup(
    cli: &Cli,
    name: &str,
    email: &str,
    password: &str,
    address: &str,
) -> Result<()> {
    let session = SessionStore::global();
    let (controller, outcome) = hosted_controller(session);

    // Host the signup form the way the interactive screen would.
    controller.switch_mode(FlowMode::Signup);
    controller
        .submit_signup(name, email, password, address)
        .await;

    // A successful registration drops the flow back to the login form.
    let created = controller.mode() == FlowMode::Login;
    let outcome = outcome.lock().unwrap();

    match cli.format {
        OutputFormat::Text => {
            for msg in &outcome.feedback {
                println!("{}", msg);
            }
            if created {
                println!("You can now sign in with: shopsense login --email {}", email);
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "created": created,
                    "feedback": outcome.feedback,
                })
            );
        }
    }

    if !created {
        std::process::exit(1);
    }
    Ok(())
}

pub fn cmd_config(cli: &Cli) -> Result<()> {
    let api_config = api::load_api_config();
    let config_path = api::config::get_config_file_path_string();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration");
            println!("=============");
            println!();
            println!("Config file:   {}", config_path);
            println!(
                "API endpoint:  {} (from {})",
                api_config.url, api_config.source
            );
            println!();
            println!("Environment variables:");
            println!("  SHOPSENSE_API_URL - Override API endpoint");
            println!();
            println!("Example config.toml:");
            println!();
            println!("{}", api::config::generate_example_config());
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path,
                    "api_url": api_config.url,
                    "api_source": format!("{}", api_config.source),
                })
            );
        }
    }

    Ok(())
}
