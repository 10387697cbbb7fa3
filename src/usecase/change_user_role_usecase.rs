use tracing::info;

use crate::{
    domain::{
        error::DomainError,
        models::user::{UserId, UserRole},
        repositories::user_repository::UserRepository,
    },
    usecase::active_actor,
};

pub struct ChangeUserRoleUsecase<U: UserRepository> {
    user_repository: U,
}

impl<U: UserRepository + Send + Sync> ChangeUserRoleUsecase<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    /// Move a subordinate account to another role the actor outranks
    pub async fn change_role(
        &self,
        actor_id: &UserId,
        target_id: &UserId,
        new_role: UserRole,
    ) -> Result<(), DomainError> {
        let actor = active_actor(&self.user_repository, actor_id).await?;
        let mut target = self
            .user_repository
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if actor.id() == target.id() {
            return Err(DomainError::Unauthorized(
                "cannot change your own role".to_string(),
            ));
        }
        if !actor.can_manage(&target) {
            return Err(DomainError::Unauthorized(
                "can only change roles of lower-level accounts".to_string(),
            ));
        }
        if !actor.can_create_role(new_role) {
            return Err(DomainError::Unauthorized(format!(
                "cannot assign role {new_role}"
            )));
        }
        if target.role() == new_role {
            return Err(DomainError::RoleUnchanged(new_role.to_string()));
        }

        let previous = target.role();
        target.change_role(new_role);
        self.user_repository.save(&target).await?;

        info!(
            user_id = %target.id(),
            changed_by = %actor.id(),
            from = previous.as_str(),
            to = new_role.as_str(),
            "user role changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        domain::models::{credential::HashedPassword, user::User},
        test_support::InMemoryUserRepository,
    };

    struct Harness {
        usecase: ChangeUserRoleUsecase<InMemoryUserRepository>,
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
            usecase: ChangeUserRoleUsecase::new(repository.clone()),
            repository,
            admin_id,
            clerk_id,
            resident_id,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_promote_resident_to_clerk(harness: Harness) {
        harness
            .usecase
            .change_role(&harness.admin_id, &harness.resident_id, UserRole::Clerk)
            .await
            .unwrap();

        let stored = harness.repository.get(&harness.resident_id).unwrap();
        assert_eq!(stored.role(), UserRole::Clerk);
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_own_role_negative(harness: Harness) {
        let result = harness
            .usecase
            .change_role(&harness.admin_id, &harness.admin_id, UserRole::Clerk)
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(msg)) if msg.contains("own role")));
    }

    #[rstest]
    #[tokio::test]
    async fn test_change_superior_role_negative(harness: Harness) {
        let result = harness
            .usecase
            .change_role(&harness.clerk_id, &harness.admin_id, UserRole::Resident)
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
        assert_eq!(harness.repository.get(&harness.admin_id).unwrap().role(), UserRole::Admin);
    }

    #[rstest]
    #[tokio::test]
    async fn test_assign_role_at_own_rank_negative(harness: Harness) {
        let result = harness
            .usecase
            .change_role(&harness.admin_id, &harness.clerk_id, UserRole::Admin)
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(msg)) if msg.contains("Admin")));
    }

    #[rstest]
    #[tokio::test]
    async fn test_same_role_negative(harness: Harness) {
        let err = harness
            .usecase
            .change_role(&harness.admin_id, &harness.clerk_id, UserRole::Clerk)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already has role Clerk");
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_target_negative(harness: Harness) {
        let result = harness
            .usecase
            .change_role(&harness.admin_id, &UserId::new(), UserRole::Clerk)
            .await;
        assert!(matches!(result, Err(DomainError::UserNotFound)));
    }
}
