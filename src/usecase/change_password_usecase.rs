use tracing::{info, warn};

use crate::{
    domain::{
        error::DomainError,
        models::user::UserId,
        repositories::user_repository::UserRepository,
        services::{password_policy::PasswordPolicy, password_service::PasswordHasher},
    },
    usecase::hashing_gate::HashingGate,
};

/// A user changing their own password
pub struct ChangePasswordUsecase<U: UserRepository, P: PasswordHasher> {
    user_repository: U,
    hashing: HashingGate<P>,
    policy: PasswordPolicy,
}

impl<U: UserRepository, P: PasswordHasher + 'static> ChangePasswordUsecase<U, P> {
    pub fn new(user_repository: U, hashing: HashingGate<P>) -> Self {
        Self {
            user_repository,
            hashing,
            policy: PasswordPolicy,
        }
    }

    pub async fn change_password(
        &self,
        actor_id: &UserId,
        user_id: &UserId,
        current_password: String,
        new_password: String,
    ) -> Result<(), DomainError>
    where
        U: Send + Sync,
    {
        if actor_id != user_id {
            return Err(DomainError::Unauthorized(
                "cannot change another user's password".to_string(),
            ));
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if !self
            .hashing
            .verify(&current_password, user.password_hash())
            .await?
        {
            warn!(%user_id, "password change with wrong current password");
            return Err(DomainError::IncorrectPassword);
        }

        self.policy.check(&new_password)?;

        let new_hash = self.hashing.hash(&new_password).await?;
        user.change_password_hash(new_hash);
        self.user_repository.save(&user).await?;

        info!(%user_id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        domain::models::user::{User, UserRole},
        infrastructure::bcrypt_password_hasher::BcryptPasswordHasher,
        test_support::{InMemoryUserRepository, fast_hasher},
    };

    struct Harness {
        usecase: ChangePasswordUsecase<InMemoryUserRepository, BcryptPasswordHasher>,
        repository: InMemoryUserRepository,
        user_id: UserId,
    }

    #[fixture]
    fn harness() -> Harness {
        let hash = fast_hasher().hash("Secret123!").unwrap();
        let user = User::new(UserId::new(), "clerk01".to_string(), hash, UserRole::Clerk).unwrap();
        let user_id = *user.id();
        let repository = InMemoryUserRepository::with_users([user]);
        Harness {
            usecase: ChangePasswordUsecase::new(repository.clone(), HashingGate::new(fast_hasher(), 1)),
            repository,
            user_id,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_password_positive(harness: Harness) {
        harness
            .usecase
            .change_password(
                &harness.user_id,
                &harness.user_id,
                "Secret123!".to_string(),
                "NewSecret456".to_string(),
            )
            .await
            .unwrap();

        let stored = harness.repository.get(&harness.user_id).unwrap();
        assert!(fast_hasher().verify("NewSecret456", stored.password_hash()));
        assert!(!fast_hasher().verify("Secret123!", stored.password_hash()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_password_wrong_current_negative(harness: Harness) {
        let result = harness
            .usecase
            .change_password(
                &harness.user_id,
                &harness.user_id,
                "wrong".to_string(),
                "NewSecret456".to_string(),
            )
            .await;
        assert!(matches!(result, Err(DomainError::IncorrectPassword)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_password_weak_new_negative(harness: Harness) {
        let result = harness
            .usecase
            .change_password(
                &harness.user_id,
                &harness.user_id,
                "Secret123!".to_string(),
                "short".to_string(),
            )
            .await;
        assert!(matches!(result, Err(DomainError::WeakPassword(_))));

        let stored = harness.repository.get(&harness.user_id).unwrap();
        assert!(fast_hasher().verify("Secret123!", stored.password_hash()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_someone_elses_password_negative(harness: Harness) {
        let result = harness
            .usecase
            .change_password(
                &UserId::new(),
                &harness.user_id,
                "Secret123!".to_string(),
                "NewSecret456".to_string(),
            )
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_password_missing_user_negative(harness: Harness) {
        let ghost = UserId::new();
        let result = harness
            .usecase
            .change_password(&ghost, &ghost, "Secret123!".to_string(), "NewSecret456".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::UserNotFound)));
    }
}
