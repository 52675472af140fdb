//! Authentication flow for ShopSense clients.
//!
//! Provides the login/signup flow controller, the gateway contract it talks
//! through, the post-login routing policy and the process-wide session store.

mod controller;
pub(crate) mod gateway;
mod routing;
mod session;
pub(crate) mod types;

pub use controller::{AuthFlowController, AuthFlowEvent, EventCallback, FlowMode};
pub use gateway::{AuthGateway, GatewayError};
pub use routing::{destination_for_role, Destination};
pub use session::SessionStore;
pub use types::{
    AuthenticatedUser, Credential, RegistrationProfile, ROLE_ADMIN, ROLE_CUSTOMER, STATUS_PENDING,
};
