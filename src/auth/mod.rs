pub mod extractors;
pub mod middleware;
pub mod password;

use serde::Deserialize;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::RequireSession;
pub use password::{hash_password, verify_password};

/// Authorization scope attached to a resource's routes.
///
/// The Project/Task asymmetry is intended: project routes are owner-scoped
/// behind the session gate while task routes are open to any caller. Each
/// resource declares its policy as a const next to its handlers, and the
/// route wiring reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Every operation requires a valid session, and queries are restricted
    /// to rows owned by the authenticated user.
    OwnerScoped,
    /// Operations are open to any caller: no session, no ownership scoping.
    Open,
}

impl AccessPolicy {
    /// Whether routes under this policy sit behind the session gate.
    pub fn requires_session(self) -> bool {
        matches!(self, AccessPolicy::OwnerScoped)
    }
}

/// Payload for a new user registration request.
///
/// All fields are optional at the type level; the handler applies the
/// presence check (absent, null and empty are all treated as missing) and
/// answers 400 itself.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Payload for a user login request. Same presence handling as
/// [`RegisterRequest`].
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

impl RegisterRequest {
    /// The three required fields, or `None` when any is missing or blank.
    pub fn into_fields(self) -> Option<(String, String, String)> {
        Some((
            present(self.username)?,
            present(self.email)?,
            present(self.password)?,
        ))
    }
}

impl LoginRequest {
    /// Email and password, or `None` when either is missing or blank.
    pub fn into_fields(self) -> Option<(String, String)> {
        Some((present(self.email)?, present(self.password)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_presence_check() {
        let complete = RegisterRequest {
            username: Some("alice".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some("pw123".to_string()),
        };
        assert_eq!(
            complete.into_fields(),
            Some(("alice".to_string(), "a@x.com".to_string(), "pw123".to_string()))
        );

        let missing_email = RegisterRequest {
            username: Some("alice".to_string()),
            email: None,
            password: Some("pw123".to_string()),
        };
        assert_eq!(missing_email.into_fields(), None);

        // Empty strings count as missing
        let blank_password = RegisterRequest {
            username: Some("alice".to_string()),
            email: Some("a@x.com".to_string()),
            password: Some(String::new()),
        };
        assert_eq!(blank_password.into_fields(), None);
    }

    #[test]
    fn test_login_request_presence_check() {
        let complete = LoginRequest {
            email: Some("a@x.com".to_string()),
            password: Some("pw123".to_string()),
        };
        assert_eq!(
            complete.into_fields(),
            Some(("a@x.com".to_string(), "pw123".to_string()))
        );

        let missing_password = LoginRequest {
            email: Some("a@x.com".to_string()),
            password: None,
        };
        assert_eq!(missing_password.into_fields(), None);
    }

    #[test]
    fn test_access_policy_gating() {
        assert!(AccessPolicy::OwnerScoped.requires_session());
        assert!(!AccessPolicy::Open.requires_session());
    }
}
