use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

pub const NAME_MIN_LEN: u64 = 3;
pub const NAME_MAX_LEN: u64 = 20;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier (0 until persisted)
    #[serde(default)]
    pub id: i32,
    /// Display name
    pub name: String,
    /// User email (unique)
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl User {
    /// Create an unsaved user (password is hashed by the service layer)
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: 0,
            name,
            email,
            password_hash,
        }
    }
}

/// DTO for user registration
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = NAME_MIN_LEN, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, email: &str, password: &str) -> RegisterUser {
        RegisterUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_validation() {
        assert!(registration("ana", "ana@example.com", "pw").validate().is_ok());
        assert!(registration("al", "al@example.com", "pw").validate().is_err());
        assert!(registration(&"n".repeat(21), "n@example.com", "pw").validate().is_err());
        assert!(registration("bruno", "not-an-email", "pw").validate().is_err());
        assert!(registration("bruno", "bruno@example.com", "").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", registration("carla", "carla@example.com", "hunter22"));
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("carla@example.com"));
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new("dario".into(), "dario@example.com".into(), "$argon2id$...".into());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "dario@example.com");
    }
}
