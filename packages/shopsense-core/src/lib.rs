//! ShopSense Core Library
//!
//! This crate provides the core functionality for ShopSense clients:
//! - Authentication flow (login/signup mode state, submissions, feedback)
//! - Role-based post-login routing
//! - Process-wide session state
//! - Backend API access (sign-in, sign-up)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shopsense_core::api::ApiClient;
//! use shopsense_core::auth::{AuthFlowController, AuthFlowEvent, EventCallback, SessionStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Print every event the controller emits
//!     let events: EventCallback = Box::new(|event: AuthFlowEvent| println!("{:?}", event));
//!
//!     let controller = AuthFlowController::new(
//!         Arc::new(ApiClient::new()),
//!         SessionStore::global(),
//!         Some(events),
//!     );
//!
//!     controller.submit_login("jane@example.com", "secret").await;
//! }
//! ```

pub mod api;
pub mod auth;

// Re-export commonly used types
pub use api::{ApiClient, ApiEndpointConfig, ConfigSource};
pub use auth::{
    AuthFlowController, AuthFlowEvent, AuthGateway, AuthenticatedUser, Credential, Destination,
    EventCallback, FlowMode, GatewayError, RegistrationProfile, SessionStore,
};
