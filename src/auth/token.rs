use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime in seconds. Issued tokens expire one hour after issuance.
const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Represents the claims encoded within a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and verifies signed bearer tokens.
///
/// Built once at startup from the configured signing secret and shared across
/// all requests. Because the key is fixed for the process lifetime, tokens
/// from an earlier login remain verifiable by later requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Generates a signed token for a verified user identity.
    ///
    /// # Returns
    /// A `Result` containing the token string, or
    /// `AppError::InternalServerError` if encoding fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::seconds(TOKEN_TTL_SECONDS))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// Default validation checks apply: signature and expiration. A missing or
    /// unparseable subject claim fails deserialization and is rejected the
    /// same way as a forged token.
    ///
    /// # Returns
    /// The decoded `Claims` if the token is valid, otherwise
    /// `AppError::Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generation_and_verification() {
        let service = TokenService::new(b"test_secret_for_gen_verify");
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_token_expiration() {
        let service = TokenService::new(b"test_secret_for_expiration");

        // Forge claims that expired two hours ago, signed with the right key.
        let expiration = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: expiration,
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_for_expiration"),
        )
        .unwrap();

        match service.verify(&expired_token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(msg.contains("ExpiredSignature"), "unexpected message: {}", msg);
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = TokenService::new(b"test_secret_for_tampering");
        let token = service.issue(Uuid::new_v4()).unwrap();

        // Flip the final signature character to a different base64url symbol.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        match service.verify(&tampered) {
            Err(AppError::Unauthorized(_)) => {}
            Ok(_) => panic!("Token should have been invalid due to tampered signature"),
            Err(e) => panic!("Unexpected error type for tampered token: {:?}", e),
        }
    }

    #[test]
    fn test_token_from_different_key_rejected() {
        let issuer = TokenService::new(b"key_one");
        let verifier = TokenService::new(b"key_two");

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        match verifier.verify(&token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(
                    msg.contains("InvalidSignature") || msg.contains("InvalidToken"),
                    "unexpected message: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid across key boundaries"),
            Err(e) => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new(b"test_secret_for_garbage");
        assert!(matches!(
            service.verify("not-a-token"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(service.verify(""), Err(AppError::Unauthorized(_))));
    }
}
