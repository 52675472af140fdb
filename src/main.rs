//! ShopSense - storefront client
//!
//! Terminal front-end for the ShopSense shop service:
//! - Interactive login/signup screen with role-based landing views
//! - Headless subcommands for scripted sign-in and registration

mod cli;
mod commands;
mod screen;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("shopsense={},shopsense_core={}", log_level, log_level).into()
            }),
        )
        .with_target(false)
        .init();

    debug!("Starting ShopSense client");

    match &cli.command {
        Some(Commands::Login { email, password }) => {
            commands::cmd_login(&cli, &email, &password).await
        }
        Some(Commands::Signup {
            name,
            email,
            password,
            address,
        }) => commands::cmd_signup(&cli, &name, &email, &password, &address).await,
        Some(Commands::Config) => commands::cmd_config(&cli),
        None => screen::run().await,
    }
}
