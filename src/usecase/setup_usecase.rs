use tokio::sync::Mutex;
use tracing::info;

use crate::{
    domain::{
        error::DomainError,
        models::user::{User, UserId, UserRole},
        repositories::user_repository::UserRepository,
        services::{password_policy::PasswordPolicy, password_service::PasswordHasher},
    },
    usecase::hashing_gate::HashingGate,
};

/// First-run creation of the super admin account
pub struct SetupUsecase<U: UserRepository, P: PasswordHasher> {
    user_repository: U,
    hashing: HashingGate<P>,
    policy: PasswordPolicy,
    setup_lock: Mutex<()>,
}

impl<U: UserRepository, P: PasswordHasher + 'static> SetupUsecase<U, P> {
    pub fn new(user_repository: U, hashing: HashingGate<P>) -> Self {
        Self {
            user_repository,
            hashing,
            policy: PasswordPolicy,
            setup_lock: Mutex::new(()),
        }
    }

    pub async fn needs_setup(&self) -> Result<bool, DomainError>
    where
        U: Send + Sync,
    {
        Ok(!self.user_repository.has_super_admin().await?)
    }

    pub async fn execute(&self, username: String, password: String) -> Result<User, DomainError>
    where
        U: Send + Sync,
    {
        // held until the account is stored so concurrent setups see each other
        let _guard = self.setup_lock.lock().await;
        if self.user_repository.has_super_admin().await? {
            return Err(DomainError::AlreadySetUp);
        }

        self.policy.check(&password)?;
        if username.trim().is_empty() {
            return Err(DomainError::EmptyUsername);
        }

        let password_hash = self.hashing.hash(&password).await?;
        let super_admin = User::new(UserId::new(), username, password_hash, UserRole::SuperAdmin)?;
        self.user_repository
            .save(&super_admin)
            .await
            .map_err(DomainError::from_account_insert)?;

        info!(user_id = %super_admin.id(), "created super admin account");
        Ok(super_admin)
    }
}
