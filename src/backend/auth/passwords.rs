//! Password hashing with bcrypt.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

use crate::backend::error::ApiError;

pub async fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    let password = password.to_string();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::internal(format!("hashing task failed: {e}")))??;
    Ok(hashed)
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::internal(format!("hashing task failed: {e}")))??;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("secret123", 4).await.unwrap();
        assert_ne!(hash, "secret123");
        assert!(verify_password("secret123", &hash).await.unwrap());
        assert!(!verify_password("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash() {
        assert!(verify_password("secret123", "not-a-bcrypt-hash").await.is_err());
    }
}
