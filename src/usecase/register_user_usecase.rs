use tracing::info;

use crate::{
    domain::{
        error::DomainError,
        models::{
            resident::ResidentId,
            user::{User, UserId, UserRole},
        },
        repositories::user_repository::UserRepository,
        services::{password_policy::PasswordPolicy, password_service::PasswordHasher},
    },
    usecase::{active_actor, hashing_gate::HashingGate},
};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub linked_resident_id: Option<String>,
}

pub struct RegisterUserUsecase<U: UserRepository, P: PasswordHasher> {
    user_repository: U,
    hashing: HashingGate<P>,
    policy: PasswordPolicy,
}

impl<U: UserRepository, P: PasswordHasher + 'static> RegisterUserUsecase<U, P> {
    pub fn new(user_repository: U, hashing: HashingGate<P>) -> Self {
        Self {
            user_repository,
            hashing,
            policy: PasswordPolicy,
        }
    }

    /// Create an account on behalf of `actor_id`, who must outrank the new role
    pub async fn create_user(&self, actor_id: &UserId, input: NewUser) -> Result<User, DomainError>
    where
        U: Send + Sync,
    {
        let actor = active_actor(&self.user_repository, actor_id).await?;

        if !actor.can_create_role(input.role) {
            return Err(DomainError::Unauthorized(format!(
                "{} accounts cannot create {} accounts",
                actor.role(),
                input.role
            )));
        }

        self.policy.check(&input.password)?;

        let username = input.username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        if self.user_repository.find_by_username(&username).await?.is_some() {
            return Err(DomainError::UsernameTaken);
        }

        let linked_resident_id = input
            .linked_resident_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(ResidentId::new)
            .transpose()?;

        let password_hash = self.hashing.hash(&input.password).await?;
        let mut user = User::new(UserId::new(), username, password_hash, input.role)?;
        if let Some(resident_id) = linked_resident_id {
            user.link_resident(resident_id);
        }

        self.user_repository
            .save(&user)
            .await
            .map_err(DomainError::from_account_insert)?;
        info!(user_id = %user.id(), created_by = %actor.id(), role = user.role().as_str(), "created user");

        Ok(user)
    }
}
