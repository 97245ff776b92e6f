use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use pbkdf2::pbkdf2_hmac;
use rand::RngExt;
use sha2::Sha256;

use crate::domain::repository::PasswordHasher;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 hasher producing `pbkdf2:sha256:{iterations}${salt}${hash}`,
/// with salt and hash in unpadded URL-safe base64.
#[derive(Debug, Clone, Copy)]
pub struct Pbkdf2Hasher {
    pub iterations: u32,
}

impl Pbkdf2Hasher {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl PasswordHasher for Pbkdf2Hasher {
    fn hash(&self, plain: &str) -> String {
        let mut rng = rand::rng();
        let salt: [u8; SALT_LEN] = std::array::from_fn(|_| rng.random_range(0..=u8::MAX));
        let mut key = [0u8; KEY_LEN];
        pbkdf2_hmac::<Sha256>(plain.as_bytes(), &salt, self.iterations, &mut key);
        format!(
            "pbkdf2:sha256:{}${}${}",
            self.iterations,
            URL_SAFE_NO_PAD.encode(salt),
            URL_SAFE_NO_PAD.encode(key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recomputes the key with the salt and iteration count stored in `encoded`.
    fn verify(plain: &str, encoded: &str) -> bool {
        let Some(rest) = encoded.strip_prefix("pbkdf2:sha256:") else {
            return false;
        };
        let mut parts = rest.split('$');
        let (Some(iterations), Some(salt), Some(hash), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (URL_SAFE_NO_PAD.decode(salt), URL_SAFE_NO_PAD.decode(hash))
        else {
            return false;
        };
        if iterations == 0 || expected.is_empty() {
            return false;
        }
        let mut computed = vec![0u8; expected.len()];
        pbkdf2_hmac::<Sha256>(plain.as_bytes(), &salt, iterations, &mut computed);
        computed == expected
    }

    #[test]
    fn should_verify_own_hash() {
        let hasher = Pbkdf2Hasher::new(1_000);
        let encoded = hasher.hash("hunter2");
        assert!(encoded.starts_with("pbkdf2:sha256:1000$"));
        assert!(verify("hunter2", &encoded));
        assert!(!verify("hunter3", &encoded));
    }

    #[test]
    fn should_salt_every_hash() {
        let hasher = Pbkdf2Hasher::new(1_000);
        assert_ne!(hasher.hash("same"), hasher.hash("same"));
    }

    #[test]
    fn should_encode_iteration_count_in_hash() {
        let encoded = Pbkdf2Hasher::new(500).hash("pw");
        assert!(encoded.starts_with("pbkdf2:sha256:500$"));
        assert!(verify("pw", &encoded));
        assert!(!verify("pw", &encoded.replacen(":500$", ":501$", 1)));
    }
}
