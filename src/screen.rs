//! Interactive authentication screen.
//!
//! Presentation host for the auth flow controller: renders the form for the
//! active mode, forwards submissions, prints feedback as it arrives and
//! follows the controller's navigation into the landing views.

use anyhow::Result;
use shopsense_core::api::ApiClient;
use shopsense_core::auth::{
    AuthFlowController, AuthFlowEvent, Destination, EventCallback, FlowMode, SessionStore,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Run the interactive session: auth screen, then the landing view the
/// controller navigates to, until the user quits.
pub async fn run() -> Result<()> {
    let session = SessionStore::global();

    println!("ShopSense");
    loop {
        let Some(destination) = auth_screen(session.clone()).await? else {
            return Ok(());
        };
        if !home_screen(&session, destination)? {
            return Ok(());
        }
        // Logged out: fall through into a fresh auth screen.
    }
}

/// One input line of a form field.
enum FieldInput {
    Value(String),
    Switch(FlowMode),
    Quit,
}

/// A fully read form, or the action that interrupted it.
enum FormInput {
    Fields(Vec<String>),
    Switch(FlowMode),
    Quit,
}

/// Host an auth flow controller until it navigates somewhere or the user
/// quits. Returns the destination, or `None` on quit.
async fn auth_screen(session: SessionStore) -> Result<Option<Destination>> {
    let destination: Arc<Mutex<Option<Destination>>> = Arc::new(Mutex::new(None));

    let sink = destination.clone();
    let events: EventCallback = Box::new(move |event| match event {
        AuthFlowEvent::Feedback(msg) => println!("  {}", msg),
        AuthFlowEvent::ModeChanged(mode) => print_form_header(mode),
        AuthFlowEvent::Navigate(dest) => *sink.lock().unwrap() = Some(dest),
    });

    let controller = AuthFlowController::new(Arc::new(ApiClient::new()), session, Some(events));
    print_form_header(controller.mode());

    loop {
        let form = match controller.mode() {
            FlowMode::Login => read_form(&["Email", "Password"])?,
            FlowMode::Signup => read_form(&["Name", "Email", "Password", "Address"])?,
        };

        match (controller.mode(), form) {
            (_, FormInput::Quit) => {
                controller.dispose();
                return Ok(None);
            }
            (_, FormInput::Switch(mode)) => {
                controller.switch_mode(mode);
            }
            (FlowMode::Login, FormInput::Fields(fields)) => {
                controller.submit_login(&fields[0], &fields[1]).await;
            }
            (FlowMode::Signup, FormInput::Fields(fields)) => {
                controller
                    .submit_signup(&fields[0], &fields[1], &fields[2], &fields[3])
                    .await;
            }
        }

        if let Some(dest) = *destination.lock().unwrap() {
            controller.dispose();
            return Ok(Some(dest));
        }
    }
}

/// Landing view after a successful sign-in. Returns `true` when the user
/// logged out (back to the auth screen), `false` on quit.
fn home_screen(session: &SessionStore, destination: Destination) -> Result<bool> {
    println!();
    match destination {
        Destination::AdminHome => println!("Admin dashboard"),
        Destination::DefaultHome => println!("Storefront"),
    }
    println!("( /status, /logout, /quit )");

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim() {
            "/status" => match session.current_user_id() {
                Some(id) => println!("  Signed in (user id {})", id),
                None => println!("  Not signed in"),
            },
            "/logout" => {
                session.clear();
                println!("  Signed out");
                return Ok(true);
            }
            "/quit" => return Ok(false),
            "" => {}
            other => println!("  Unknown command: {}", other),
        }
    }
}

fn print_form_header(mode: FlowMode) {
    println!();
    match mode {
        FlowMode::Login => println!("Sign in  ( /signup to create an account, /quit to exit )"),
        FlowMode::Signup => println!("Create account  ( /login to sign in instead, /quit to exit )"),
    }
}

fn read_form(labels: &[&str]) -> Result<FormInput> {
    let mut values = Vec::with_capacity(labels.len());
    for label in labels {
        match prompt(label)? {
            FieldInput::Value(value) => values.push(value),
            FieldInput::Switch(mode) => return Ok(FormInput::Switch(mode)),
            FieldInput::Quit => return Ok(FormInput::Quit),
        }
    }
    Ok(FormInput::Fields(values))
}

fn prompt(label: &str) -> Result<FieldInput> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        // EOF behaves like quitting.
        return Ok(FieldInput::Quit);
    }

    match line.trim() {
        "/quit" => Ok(FieldInput::Quit),
        "/login" => Ok(FieldInput::Switch(FlowMode::Login)),
        "/signup" => Ok(FieldInput::Switch(FlowMode::Signup)),
        value => Ok(FieldInput::Value(value.to_string())),
    }
}
