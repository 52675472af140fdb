//! Value objects exchanged with the backend during authentication.
//!
//! Each submission builds these fresh from the current form input; nothing
//! here is cached or reused across attempts.

use serde::{Deserialize, Serialize};

/// Account status assigned to every new registration until the backend
/// approves it.
pub const STATUS_PENDING: &str = "Pending";

/// Role assigned to every self-registered account. Elevated roles are only
/// ever assigned server-side.
pub const ROLE_CUSTOMER: &str = "CUSTOMER";

/// Role that unlocks the administrative destination after login.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Email/password pair submitted for login. No other fields are sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// New-account data submitted for signup.
///
/// `status`, `email_verified` and `role` are fixed at construction and not
/// settable by callers, so a client can never self-assign a privileged role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    status: String,
    email_verified: bool,
    role: String,
}

impl RegistrationProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            address: address.into(),
            status: STATUS_PENDING.to_string(),
            email_verified: false,
            role: ROLE_CUSTOMER.to_string(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

/// The backend's answer to a successful sign-in.
///
/// `role` is server-authoritative; the client never sends a role of its own
/// on login and must not trust any locally held value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_profile_fixes_server_fields() {
        let profile = RegistrationProfile::new("Jane", "jane@example.com", "secret", "1 Main St");
        assert_eq!(profile.status(), STATUS_PENDING);
        assert!(!profile.email_verified());
        assert_eq!(profile.role(), ROLE_CUSTOMER);
    }

    #[test]
    fn registration_profile_serializes_camel_case() {
        let profile = RegistrationProfile::new("Jane", "jane@example.com", "secret", "1 Main St");
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["emailVerified"], serde_json::json!(false));
        assert_eq!(value["status"], serde_json::json!("Pending"));
        assert_eq!(value["role"], serde_json::json!("CUSTOMER"));
    }

    #[test]
    fn credential_sends_only_email_and_password() {
        let credential = Credential::new("jane@example.com", "secret");
        let value = serde_json::to_value(&credential).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["email", "password"]);
    }

    #[test]
    fn authenticated_user_parses_camel_case() {
        let user: AuthenticatedUser = serde_json::from_str(
            r#"{"id": 7, "name": "Jane", "email": "jane@example.com", "role": "ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, "ADMIN");
    }
}
