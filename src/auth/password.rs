use bcrypt::{hash, verify, DEFAULT_COST};

use crate::utils::error::AppResult;

pub fn hash_password(plain: &str) -> AppResult<String> {
    Ok(hash(plain, DEFAULT_COST)?)
}

pub fn verify_password(plain: &str, hashed: &str) -> AppResult<bool> {
    Ok(verify(plain, hashed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        // low cost keeps the test fast; production path uses DEFAULT_COST
        let hashed = hash("s3cret-passw0rd", 4).unwrap();
        assert!(verify_password("s3cret-passw0rd", &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("same-input", 4).unwrap();
        let b = hash("same-input", 4).unwrap();
        assert_ne!(a, b);
    }
}
