use crate::domain::{
    error::DomainError,
    models::user::{User, UserId},
};

pub type Token = String;

pub trait TokenService: Clone + Send + Sync {
    fn generate(&self, user: &User) -> Result<Token, DomainError>;

    /// Resolve a bearer token to the id of the user it was issued for
    fn authenticate(&self, token: &str) -> Result<UserId, DomainError>;
}
