use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    // Usernames: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// A user account as returned by the API.
///
/// The stored password hash is deliberately not part of this struct, so it can
/// never leak into a response body.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier for the user (UUID v4), assigned server-side.
    pub id: Uuid,
    /// Unique username, at most 45 characters.
    pub username: String,
}

/// Input payload for registering a new user or replacing an existing one.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    /// Desired username. 3 to 45 characters, alphanumeric plus underscores
    /// and hyphens. The 45-character ceiling matches the storage column.
    #[validate(
        length(min = 3, max = 45),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Plaintext password, 6 to 72 characters (bcrypt's input limit).
    /// Only the bcrypt hash of this value is ever persisted.
    #[validate(length(min = 6, max = 72))]
    pub password: String,
}

/// Payload for `PUT /api/users/{id}`: a full replace of the account.
///
/// The embedded id must match the path id or the request is rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceUserRequest {
    pub id: Uuid,
    #[validate(
        length(min = 3, max = 45),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    #[validate(length(min = 6, max = 72))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_user_input_validation() {
        // Test valid input
        let input = UserInput {
            username: "test_user-123".to_string(),
            password: "password123".to_string(),
        };
        assert!(input.validate().is_ok());

        // Test username with invalid characters
        let input = UserInput {
            username: "test user!".to_string(),
            password: "password123".to_string(),
        };
        assert!(input.validate().is_err());

        // Test username too short
        let input = UserInput {
            username: "tu".to_string(),
            password: "password123".to_string(),
        };
        assert!(input.validate().is_err());

        // Test username too long (storage column holds 45 characters)
        let input = UserInput {
            username: "a".repeat(46),
            password: "password123".to_string(),
        };
        assert!(input.validate().is_err());

        // Test short password
        let input = UserInput {
            username: "testuser".to_string(),
            password: "short".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_replace_user_request_validation() {
        let request = ReplaceUserRequest {
            id: Uuid::new_v4(),
            username: "renamed_user".to_string(),
            password: "newpassword".to_string(),
        };
        assert!(request.validate().is_ok());

        let request = ReplaceUserRequest {
            id: Uuid::new_v4(),
            username: "renamed user!".to_string(),
            password: "newpassword".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
