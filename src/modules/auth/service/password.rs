use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

const MEMORY_COST_KIB: u32 = 19 * 1024;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to hash password: {0}")]
    Hashing(String),
}

fn hasher() -> Result<Argon2<'static>, Error> {
    Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, None)
        .map(|params| Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
        .map_err(|err| Error::Hashing(err.to_string()))
}

/// Hashes a password into a PHC string with a fresh random salt.
pub fn hash(plaintext: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Failed to hash password: {}", err);
            Error::Hashing(err.to_string())
        })
}

/// Checks a password against a stored PHC string. Malformed hashes never match.
pub fn verify(plaintext: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!("Refusing to verify against a malformed password hash: {}", err);
            return false;
        }
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

pub async fn hash_in_background(plaintext: String) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || hash(&plaintext))
        .await
        .map_err(|err| Error::Hashing(err.to_string()))?
}

pub async fn verify_in_background(plaintext: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify(&plaintext, &hash))
        .await
        .unwrap_or_else(|err| {
            tracing::error!("Password verification task failed: {}", err);
            false
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_hashed_password() {
        let hash = hash("secret").unwrap();

        assert!(verify("secret", &hash));
        assert!(!verify("wrong", &hash));
    }

    #[test]
    fn salts_every_hash() {
        let first = hash("secret").unwrap();
        let second = hash("secret").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn malformed_hashes_never_match() {
        assert!(!verify("secret", ""));
        assert!(!verify("secret", "not-a-hash"));
        assert!(!verify("secret", "$argon2id$v=19$broken"));
    }

    #[tokio::test]
    async fn background_helpers_round_trip() {
        let hash = hash_in_background("secret".to_string()).await.unwrap();

        assert!(verify_in_background("secret".to_string(), hash.clone()).await);
        assert!(!verify_in_background("Secret".to_string(), hash).await);
    }
}
