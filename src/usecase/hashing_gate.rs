use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::domain::{
    error::DomainError,
    models::credential::HashedPassword,
    services::password_service::PasswordHasher,
};

/// Runs hasher calls on the blocking pool, at most `max_concurrent` at a time
#[derive(Clone)]
pub struct HashingGate<P> {
    hasher: P,
    permits: Arc<Semaphore>,
}

impl<P: PasswordHasher + 'static> HashingGate<P> {
    pub fn new(hasher: P, max_concurrent: usize) -> Self {
        Self {
            hasher,
            permits: Arc::new(Semaphore::new(
                max_concurrent.clamp(1, Semaphore::MAX_PERMITS),
            )),
        }
    }

    async fn run<R, F>(&self, f: F) -> Result<R, DomainError>
    where
        R: Send + 'static,
        F: FnOnce(&P) -> R + Send + 'static,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| DomainError::HashingUnavailable(e.to_string()))?;

        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || f(&hasher))
            .await
            .map_err(|e| DomainError::HashingUnavailable(format!("hashing task failed: {e}")))
    }

    pub async fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let plain_password = plain_password.to_string();
        self.run(move |hasher| hasher.hash(&plain_password)).await?
    }

    pub async fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        let plain_password = plain_password.to_string();
        let hashed_password = hashed_password.clone();
        self.run(move |hasher| hasher.verify(&plain_password, &hashed_password))
            .await
    }

    pub fn needs_rehash(&self, hashed_password: &HashedPassword) -> bool {
        self.hasher.needs_rehash(hashed_password)
    }
}
