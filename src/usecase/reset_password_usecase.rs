use tracing::info;

use crate::{
    domain::{
        error::DomainError,
        models::user::UserId,
        repositories::user_repository::UserRepository,
        services::{password_policy::PasswordPolicy, password_service::PasswordHasher},
    },
    usecase::{active_actor, hashing_gate::HashingGate},
};

/// A higher-ranked user setting a new password for a subordinate account
pub struct ResetPasswordUsecase<U: UserRepository, P: PasswordHasher> {
    user_repository: U,
    hashing: HashingGate<P>,
    policy: PasswordPolicy,
}

impl<U: UserRepository, P: PasswordHasher + 'static> ResetPasswordUsecase<U, P> {
    pub fn new(user_repository: U, hashing: HashingGate<P>) -> Self {
        Self {
            user_repository,
            hashing,
            policy: PasswordPolicy,
        }
    }

    pub async fn reset_password(
        &self,
        actor_id: &UserId,
        target_id: &UserId,
        new_password: String,
    ) -> Result<(), DomainError>
    where
        U: Send + Sync,
    {
        let actor = active_actor(&self.user_repository, actor_id).await?;

        let mut target = self
            .user_repository
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if !actor.can_manage(&target) {
            return Err(DomainError::Unauthorized(format!(
                "{} accounts cannot reset {} passwords",
                actor.role(),
                target.role()
            )));
        }

        self.policy.check(&new_password)?;

        let new_hash = self.hashing.hash(&new_password).await?;
        target.change_password_hash(new_hash);
        self.user_repository.save(&target).await?;

        info!(user_id = %target.id(), reset_by = %actor.id(), "password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        domain::models::{
            credential::HashedPassword,
            user::{User, UserRole},
        },
        infrastructure::bcrypt_password_hasher::BcryptPasswordHasher,
        test_support::{InMemoryUserRepository, fast_hasher},
    };

    struct Harness {
        usecase: ResetPasswordUsecase<InMemoryUserRepository, BcryptPasswordHasher>,
        repository: InMemoryUserRepository,
        admin_id: UserId,
        clerk_id: UserId,
        resident_id: UserId,
    }

    #[fixture]
    fn harness() -> Harness {
        let hash = HashedPassword::new("hash".to_string());
        let make = |name: &str, role| User::new(UserId::new(), name.to_string(), hash.clone(), role).unwrap();
        let admin = make("admin", UserRole::Admin);
        let clerk = make("clerk01", UserRole::Clerk);
        let resident = make("resident01", UserRole::Resident);
        let (admin_id, clerk_id, resident_id) = (*admin.id(), *clerk.id(), *resident.id());

        let repository = InMemoryUserRepository::with_users([admin, clerk, resident]);
        Harness {
            usecase: ResetPasswordUsecase::new(repository.clone(), HashingGate::new(fast_hasher(), 1)),
            repository,
            admin_id,
            clerk_id,
            resident_id,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_reset_subordinate_positive(harness: Harness) {
        harness
            .usecase
            .reset_password(&harness.clerk_id, &harness.resident_id, "Reset1234".to_string())
            .await
            .unwrap();

        let stored = harness.repository.get(&harness.resident_id).unwrap();
        assert!(fast_hasher().verify("Reset1234", stored.password_hash()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_reset_superior_negative(harness: Harness) {
        let result = harness
            .usecase
            .reset_password(&harness.clerk_id, &harness.admin_id, "Reset1234".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(_))));

        let stored = harness.repository.get(&harness.admin_id).unwrap();
        assert_eq!(stored.password_hash().as_str(), "hash");
    }

    #[rstest]
    #[tokio::test]
    async fn test_reset_missing_target_negative(harness: Harness) {
        let result = harness
            .usecase
            .reset_password(&harness.admin_id, &UserId::new(), "Reset1234".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::UserNotFound)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_reset_weak_password_negative(harness: Harness) {
        let result = harness
            .usecase
            .reset_password(&harness.admin_id, &harness.clerk_id, "weak".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::WeakPassword(_))));
    }
}
