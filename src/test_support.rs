//! Shared fixtures for unit tests

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use crate::{
    domain::{
        error::RepositoryError,
        models::{
            document::{Document, DocumentReference, DocumentType},
            resident::{CivilStatus, Gender, Resident, ResidentId},
            user::{User, UserId},
        },
        repositories::user_repository::UserRepository,
    },
    infrastructure::bcrypt_password_hasher::{BcryptPasswordHasher, MIN_COST},
};

pub fn sample_resident() -> Resident {
    Resident {
        id: ResidentId::new("BR-2024-0000000001".to_string()).unwrap(),
        first_name: "Juan".to_string(),
        middle_name: Some("Santos".to_string()),
        last_name: "Dela Cruz".to_string(),
        suffix: Some("Jr.".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
        gender: Gender::Male,
        civil_status: Some(CivilStatus::Married),
        address: None,
        is_active: true,
        registered_at: Utc.with_ymd_and_hms(2020, 1, 10, 8, 0, 0).unwrap(),
    }
}

pub fn sample_document(document_type: DocumentType) -> Document {
    let reference = format!("{}-2025-0000000001", document_type.reference_prefix());
    Document {
        reference: DocumentReference::new(reference).unwrap(),
        resident_id: ResidentId::new("BR-2024-0000000001".to_string()).unwrap(),
        document_type,
        purpose: Some("employment".to_string()),
        issued_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        valid_until: NaiveDate::from_ymd_opt(2026, 3, 1),
        issued_by: "clerk01".to_string(),
        additional_info: None,
    }
}

/// Cheapest legal work factor, keeps tests fast
pub fn fast_hasher() -> BcryptPasswordHasher {
    BcryptPasswordHasher::new(MIN_COST).unwrap()
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repository = Self::default();
        {
            let mut map = repository.users.lock().unwrap();
            for user in users {
                map.insert(*user.id(), user);
            }
        }
        repository
    }

    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.username() == user.username() && u.id() != user.id())
        {
            return Err(RepositoryError::Duplicate(user.username().to_string()));
        }
        users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(users)
    }

    async fn has_super_admin(&self) -> Result<bool, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.is_active() && u.role() == crate::domain::models::user::UserRole::SuperAdmin))
    }
}
