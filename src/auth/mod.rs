pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a user login request.
///
/// Deliberately unvalidated: a login attempt either matches stored
/// credentials or it does not, and the distinction between "unknown user"
/// and "wrong password" is made by the handler.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username of the account to log in to.
    pub username: String,
    /// Candidate password.
    pub password: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token for subsequent authenticated requests.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_deserialization() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username": "alice", "password": "secret123"}"#).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "secret123");

        // Missing fields are a deserialization error (HTTP 400 at the boundary)
        let missing: Result<LoginRequest, _> = serde_json::from_str(r#"{"username": "alice"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_token_response_shape() {
        let response = TokenResponse {
            token: "abc.def.ghi".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token"], "abc.def.ghi");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }
}
