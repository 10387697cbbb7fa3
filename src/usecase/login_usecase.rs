use tracing::{info, warn};

use crate::{
    domain::{
        error::DomainError,
        models::user::User,
        repositories::user_repository::UserRepository,
        services::{password_service::PasswordHasher, token_service::TokenService},
    },
    usecase::hashing_gate::HashingGate,
};

#[derive(Debug)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

pub struct LoginUsecase<U: UserRepository, P: PasswordHasher, T: TokenService> {
    user_repository: U,
    hashing: HashingGate<P>,
    token_service: T,
}

impl<U: UserRepository, P: PasswordHasher + 'static, T: TokenService> LoginUsecase<U, P, T> {
    pub fn new(user_repository: U, hashing: HashingGate<P>, token_service: T) -> Self {
        Self {
            user_repository,
            hashing,
            token_service,
        }
    }

    pub async fn login(&self, username: String, password: String) -> Result<LoginResult, DomainError>
    where
        U: Send + Sync,
    {
        let Some(mut user) = self.user_repository.find_by_username(&username).await? else {
            warn!(%username, "login for unknown user");
            return Err(DomainError::InvalidCredentials);
        };

        if !user.is_active() {
            warn!(%username, "login for deactivated account");
            return Err(DomainError::AccountDeactivated);
        }

        if !self.hashing.verify(&password, user.password_hash()).await? {
            warn!(%username, "login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        user.record_login();
        if self.hashing.needs_rehash(user.password_hash()) {
            let upgraded = self.hashing.hash(&password).await?;
            user.change_password_hash(upgraded);
            info!(user_id = %user.id(), "upgraded stored password hash");
        }
        self.user_repository.save(&user).await?;

        let token = self.token_service.generate(&user)?;
        info!(user_id = %user.id(), role = user.role().as_str(), "login succeeded");

        Ok(LoginResult { token, user })
    }
}
