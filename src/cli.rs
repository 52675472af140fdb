use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "shopsense")]
#[command(version)]
#[command(about = "ShopSense - storefront client")]
#[command(long_about = "
ShopSense is the storefront client for the ShopSense shop service.
Run it with no arguments for the interactive sign-in screen, or use
the subcommands for scripted access.

Quick start:
  1. Create an account:   shopsense signup --name ... --email ... --password ... --address ...
  2. Sign in:             shopsense login --email ... --password ...
  3. Interactive screen:  shopsense
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with an existing account
    #[command(alias = "signin")]
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Create a new customer account
    #[command(alias = "register")]
    Signup {
        /// Full name
        #[arg(long)]
        name: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Delivery address
        #[arg(long)]
        address: String,
    },

    /// Show configuration paths and settings
    Config,
}
