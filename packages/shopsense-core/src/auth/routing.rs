//! Post-login routing policy.

use crate::auth::types::ROLE_ADMIN;

/// Destination screen selected after a successful sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    AdminHome,
    DefaultHome,
}

/// Map a server-provided role onto a destination.
///
/// Total over every possible string: only an exact, case-sensitive `"ADMIN"`
/// selects the administrative destination. Unknown or malformed role values
/// fall through to the default destination, never an elevated one.
pub fn destination_for_role(role: &str) -> Destination {
    if role == ROLE_ADMIN {
        Destination::AdminHome
    } else {
        Destination::DefaultHome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_routes_to_admin_home() {
        assert_eq!(destination_for_role("ADMIN"), Destination::AdminHome);
    }

    #[test]
    fn everything_else_routes_to_default_home() {
        for role in ["CUSTOMER", "admin", "Admin", "ADMIN ", "", "MANAGER", "null"] {
            assert_eq!(destination_for_role(role), Destination::DefaultHome, "role {role:?}");
        }
    }
}
