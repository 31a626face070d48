//! # Bearer Token Management
//!
//! Issues and verifies HS256-signed JWTs that bind a request to a user id.
//!
//! The [`TokenIssuer`] is built once at startup from the configured secret and
//! shared read-only afterwards. Verification is self-contained: no session
//! lookup is needed, only the secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AuthError, Result};

/// Minimum accepted length of the signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// JWT claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a process-wide secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Build an issuer from the signing secret and the token lifetime.
    ///
    /// Fails when the secret is shorter than [`MIN_SECRET_LEN`] bytes or the
    /// lifetime is not positive.
    pub fn new(secret: &str, expiration_hours: i64) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::InvalidSecret(format!(
                "must be at least {} bytes long",
                MIN_SECRET_LEN
            )));
        }
        if expiration_hours < 1 {
            return Err(AuthError::InvalidSecret(
                "token lifetime must be at least one hour".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(expiration_hours),
        })
    }

    /// Issue a signed token for `user_id`.
    pub fn issue(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        self.sign(&claims)
    }

    /// Verify `token` and return its claims.
    ///
    /// Every failure collapses into [`AuthError::InvalidToken`].
    pub fn verify_claims(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })
    }

    /// Verify `token` and return the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<String> {
        self.verify_claims(token).map(|claims| claims.sub)
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_hours", &self.ttl.num_hours())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, 24).expect("Issuer should build with a long secret")
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let token = issuer.issue("user-123").expect("Token issuance should succeed");

        assert_eq!(issuer.verify(&token), Ok("user-123".to_string()));
    }

    #[test]
    fn test_claims_carry_expiry() {
        let issuer = issuer();
        let token = issuer.issue("user-123").unwrap();
        let claims = issuer.verify_claims(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenIssuer::new("too-short", 24);
        assert!(matches!(result, Err(AuthError::InvalidSecret(_))));
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let result = TokenIssuer::new(SECRET, 0);
        assert!(matches!(result, Err(AuthError::InvalidSecret(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer().issue("user-123").unwrap();
        let other = TokenIssuer::new("another-secret-key-that-is-long-enough!!", 24).unwrap();

        assert_eq!(other.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_garbage_rejected() {
        let issuer = issuer();
        for token in ["", "garbage", "a.b.c", "eyJhbGciOiJIUzI1NiJ9..", "...."] {
            assert_eq!(issuer.verify(token), Err(AuthError::InvalidToken), "{token:?}");
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-123".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = issuer.sign(&claims).unwrap();

        assert_eq!(issuer.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let issuer = issuer();
        let token = issuer.issue("user-123").unwrap();
        let mut parts = token.split('.');
        let header_and_payload = format!(
            "{}.{}.",
            parts.next().unwrap(),
            parts.next().unwrap()
        );

        assert_eq!(issuer.verify(&header_and_payload), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_any_single_bit_flip_rejected() {
        let issuer = issuer();
        let token = issuer.issue("user-123").unwrap();
        let bytes = token.as_bytes();

        let mut checked = 0;
        for index in 0..bytes.len() {
            for bit in 0..8 {
                let mut corrupted = bytes.to_vec();
                corrupted[index] ^= 1 << bit;
                // Flips that break UTF-8 can never arrive as header text
                let Ok(corrupted) = String::from_utf8(corrupted) else {
                    continue;
                };
                assert_eq!(
                    issuer.verify(&corrupted),
                    Err(AuthError::InvalidToken),
                    "flip of bit {bit} at byte {index} was accepted"
                );
                checked += 1;
            }
        }
        assert!(checked > bytes.len());
    }
}
