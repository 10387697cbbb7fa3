use tracing::info;

use crate::{
    domain::{
        error::DomainError,
        models::user::{User, UserId},
        repositories::user_repository::UserRepository,
    },
    usecase::active_actor,
};

/// Disabling and re-enabling subordinate accounts
pub struct DeactivateUserUsecase<U: UserRepository> {
    user_repository: U,
}

impl<U: UserRepository + Send + Sync> DeactivateUserUsecase<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    pub async fn deactivate(&self, actor_id: &UserId, target_id: &UserId) -> Result<(), DomainError> {
        let target = self.set_active(actor_id, target_id, false).await?;
        info!(user_id = %target.id(), deactivated_by = %actor_id, "user deactivated");
        Ok(())
    }

    pub async fn reactivate(&self, actor_id: &UserId, target_id: &UserId) -> Result<(), DomainError> {
        let target = self.set_active(actor_id, target_id, true).await?;
        info!(user_id = %target.id(), reactivated_by = %actor_id, "user reactivated");
        Ok(())
    }

    async fn set_active(
        &self,
        actor_id: &UserId,
        target_id: &UserId,
        active: bool,
    ) -> Result<User, DomainError> {
        let actor = active_actor(&self.user_repository, actor_id).await?;
        let mut target = self
            .user_repository
            .find_by_id(target_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if !actor.can_manage(&target) {
            return Err(DomainError::Unauthorized(format!(
                "{} accounts cannot manage {} accounts",
                actor.role(),
                target.role()
            )));
        }

        if active {
            target.reactivate();
        } else {
            target.deactivate();
        }
        self.user_repository.save(&target).await?;
        Ok(target)
    }
}
