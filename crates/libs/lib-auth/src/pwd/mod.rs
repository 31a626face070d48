//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<digest>`), so
//! the algorithm tag, cost parameters and salt travel with the digest.
//!
//! Both operations are deliberately slow. The `async` variants move the work
//! onto tokio's blocking pool so request workers keep serving other requests.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AuthError, Result};

/// Hash a password with a freshly generated salt.
pub fn hash_password_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored PHC hash.
///
/// A stored hash that cannot be parsed is an error rather than a mismatch.
pub fn verify_password_blocking(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::PasswordHash(format!("Failed to parse hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash a password on the blocking thread pool.
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password_blocking(&password))
        .await
        .map_err(|e| AuthError::PasswordHash(format!("Hashing task failed: {}", e)))?
}

/// Verify a password on the blocking thread pool.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password_blocking(&password, &hash))
        .await
        .map_err(|e| AuthError::PasswordHash(format!("Verification task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "secret1";
        let hash = hash_password_blocking(password)
            .expect("Password hashing should succeed for valid password");

        assert!(verify_password_blocking(password, &hash)
            .expect("Password verification should succeed for correct password"));
        assert!(!verify_password_blocking("secret2", &hash)
            .expect("Password verification should run for incorrect password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password_blocking("secret1").expect("First hash should succeed");
        let second = hash_password_blocking("secret1").expect("Second hash should succeed");

        assert_ne!(first, second);
        assert!(verify_password_blocking("secret1", &first).unwrap());
        assert!(verify_password_blocking("secret1", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = hash_password_blocking("visible-password").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("visible-password"));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let result = verify_password_blocking("secret1", "not-a-phc-string");

        assert!(matches!(result, Err(AuthError::PasswordHash(_))));
    }

    #[test]
    fn test_near_miss_passwords_do_not_verify() {
        let hash = hash_password_blocking("secret1").unwrap();

        for candidate in ["secret", "secret12", "Secret1", " secret1", ""] {
            assert!(
                !verify_password_blocking(candidate, &hash).unwrap(),
                "{candidate:?} must not verify"
            );
        }
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let hash = hash_password("secret1".to_string())
            .await
            .expect("Async hashing should succeed");

        assert!(verify_password("secret1".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong-password".to_string(), hash)
            .await
            .unwrap());
    }
}
