pub mod change_password_usecase;
pub mod change_user_role_usecase;
pub mod deactivate_user_usecase;
pub mod hashing_gate;
pub mod list_users_usecase;
pub mod login_usecase;
pub mod register_user_usecase;
pub mod render_document_usecase;
pub mod reset_password_usecase;
pub mod setup_usecase;

use crate::domain::{
    error::DomainError,
    models::user::{User, UserId},
    repositories::user_repository::UserRepository,
};

/// Load the account behind a token; unknown and deactivated accounts may not act
async fn active_actor<U: UserRepository + Send + Sync>(
    user_repository: &U,
    actor_id: &UserId,
) -> Result<User, DomainError> {
    user_repository
        .find_by_id(actor_id)
        .await?
        .filter(User::is_active)
        .ok_or_else(|| DomainError::Unauthorized("no active user for token".to_string()))
}
