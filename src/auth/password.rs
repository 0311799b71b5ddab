use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password with bcrypt.
///
/// bcrypt generates a fresh random salt per call and embeds it, together with
/// the cost factor, in the returned string, so the output is self-describing.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Verifies a candidate password against a stored bcrypt hash.
///
/// Fails closed: a malformed stored hash is treated as a non-match rather
/// than surfacing an error a caller could mistake for success.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match verify(password, hashed_password) {
        Ok(matched) => matched,
        Err(e) => {
            log::warn!("password verification against malformed hash: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "secret123";
        let hashed = hash_password(password).unwrap();

        // The stored form never equals the plaintext.
        assert_ne!(hashed, password);

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("secret124", &hashed));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let first = hash_password("same input").unwrap();
        let second = hash_password("same input").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same input", &first));
        assert!(verify_password("same input", &second));
    }

    #[test]
    fn test_verify_with_invalid_hash_fails_closed() {
        assert!(!verify_password("secret123", "invalidhashformat"));
        assert!(!verify_password("secret123", ""));
    }
}
