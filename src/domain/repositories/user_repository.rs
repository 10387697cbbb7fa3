use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{User, UserId},
};

#[async_trait]
pub trait UserRepository {
    /// Insert the user, or overwrite the stored row with the same id
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    /// Every account, ordered by username
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
    /// Whether an active super admin account exists
    async fn has_super_admin(&self) -> Result<bool, RepositoryError>;
}
