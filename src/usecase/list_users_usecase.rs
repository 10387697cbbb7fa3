use crate::{
    domain::{
        error::DomainError,
        models::user::{User, UserId, UserRole},
        repositories::user_repository::UserRepository,
    },
    usecase::active_actor,
};

/// Optional narrowing of the account listing
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub active_only: bool,
}

pub struct ListUsersUsecase<U: UserRepository> {
    user_repository: U,
}

impl<U: UserRepository + Send + Sync> ListUsersUsecase<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    /// Accounts ordered by username. Resident accounts may not list users.
    pub async fn list(&self, actor_id: &UserId, filter: UserFilter) -> Result<Vec<User>, DomainError> {
        let actor = active_actor(&self.user_repository, actor_id).await?;
        if actor.role() == UserRole::Resident {
            return Err(DomainError::Unauthorized(
                "Resident accounts cannot list users".to_string(),
            ));
        }

        let users = self.user_repository.find_all().await?;
        Ok(users
            .into_iter()
            .filter(|u| filter.role.is_none_or(|role| u.role() == role))
            .filter(|u| !filter.active_only || u.is_active())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{domain::models::credential::HashedPassword, test_support::InMemoryUserRepository};

    struct Harness {
        usecase: ListUsersUsecase<InMemoryUserRepository>,
        clerk_id: UserId,
        resident_id: UserId,
    }

    #[fixture]
    fn harness() -> Harness {
        let hash = HashedPassword::new("hash".to_string());
        let make = |name: &str, role| User::new(UserId::new(), name.to_string(), hash.clone(), role).unwrap();
        let clerk = make("clerk01", UserRole::Clerk);
        let resident = make("resident01", UserRole::Resident);
        let mut retired = make("resident02", UserRole::Resident);
        retired.deactivate();
        let admin = make("admin", UserRole::Admin);
        let (clerk_id, resident_id) = (*clerk.id(), *resident.id());

        Harness {
            usecase: ListUsersUsecase::new(InMemoryUserRepository::with_users([
                clerk, resident, retired, admin,
            ])),
            clerk_id,
            resident_id,
        }
    }

    fn names(users: &[User]) -> Vec<&str> {
        users.iter().map(User::username).collect()
    }

    #[rstest]
    #[case(UserFilter::default(), vec!["admin", "clerk01", "resident01", "resident02"])]
    #[case(UserFilter { role: Some(UserRole::Resident), active_only: false }, vec!["resident01", "resident02"])]
    #[case(UserFilter { role: Some(UserRole::Resident), active_only: true }, vec!["resident01"])]
    #[case(UserFilter { role: None, active_only: true }, vec!["admin", "clerk01", "resident01"])]
    #[tokio::test]
    async fn test_list_users(harness: Harness, #[case] filter: UserFilter, #[case] expected: Vec<&str>) {
        let users = harness.usecase.list(&harness.clerk_id, filter).await.unwrap();
        assert_eq!(names(&users), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn test_resident_cannot_list(harness: Harness) {
        let result = harness
            .usecase
            .list(&harness.resident_id, UserFilter::default())
            .await;
        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
    }
}
