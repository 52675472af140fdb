//! Backend API access.
//!
//! HTTP implementation of the auth gateway plus endpoint configuration.

mod client;
pub mod config;

pub use client::ApiClient;
pub use config::{load_api_config, ApiEndpointConfig, ConfigSource};
