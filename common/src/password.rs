use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::{AppError, Res};

pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Returns `false` for a mismatch and for a stored hash that cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// Hash checked when a login names no known user, so that path costs as much
/// as a wrong password.
static DECOY_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("decoy-password").unwrap_or_else(|e| {
        log::error!("Decoy hash unavailable: {}", e);
        String::new()
    })
});

/// Runs a full verify against the decoy hash and discards the result.
pub fn verify_decoy(password: &str) {
    let _ = verify_password(password, &DECOY_HASH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("secret1", "not-a-phc-string"));
    }

    #[test]
    fn decoy_hash_is_a_real_argon2_hash() {
        assert!(PasswordHash::new(&DECOY_HASH).is_ok());
        assert!(verify_password("decoy-password", &DECOY_HASH));
        verify_decoy("secret1");
    }
}
