use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{credential::HashedPassword, resident::ResidentId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);
impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::UserNotFound)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role hierarchy, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Clerk,
    Resident,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "SUPER_ADMIN",
            UserRole::Admin => "ADMIN",
            UserRole::Clerk => "CLERK",
            UserRole::Resident => "RESIDENT",
        }
    }

    /// Roles this role may create and manage
    fn subordinates(&self) -> &'static [UserRole] {
        match self {
            UserRole::SuperAdmin => &[UserRole::Admin, UserRole::Clerk, UserRole::Resident],
            UserRole::Admin => &[UserRole::Clerk, UserRole::Resident],
            UserRole::Clerk => &[UserRole::Resident],
            UserRole::Resident => &[],
        }
    }

    pub fn outranks(&self, other: UserRole) -> bool {
        self.subordinates().contains(&other)
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(UserRole::SuperAdmin),
            "ADMIN" => Ok(UserRole::Admin),
            "CLERK" => Ok(UserRole::Clerk),
            "RESIDENT" => Ok(UserRole::Resident),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            UserRole::SuperAdmin => "Super Admin",
            UserRole::Admin => "Admin",
            UserRole::Clerk => "Clerk",
            UserRole::Resident => "Resident",
        };
        f.write_str(title)
    }
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: String,
    password_hash: HashedPassword,
    role: UserRole,
    linked_resident_id: Option<ResidentId>,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserId,
        username: String,
        password_hash: HashedPassword,
        role: UserRole,
    ) -> Result<Self, DomainError> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }

        let now = Utc::now();
        Ok(Self {
            id,
            username,
            password_hash,
            role,
            linked_resident_id: None,
            is_active: true,
            created_at: now,
            last_login_at: None,
            updated_at: now,
        })
    }

    /// Rebuild a user from stored state without re-running creation rules
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: UserId,
        username: String,
        password_hash: HashedPassword,
        role: UserRole,
        linked_resident_id: Option<ResidentId>,
        is_active: bool,
        created_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            role,
            linked_resident_id,
            is_active,
            created_at,
            last_login_at,
            updated_at,
        }
    }

    pub fn change_password_hash(&mut self, new_password_hash: HashedPassword) {
        self.password_hash = new_password_hash;
        self.updated_at = Utc::now();
    }

    pub fn link_resident(&mut self, resident_id: ResidentId) {
        self.linked_resident_id = Some(resident_id);
        self.updated_at = Utc::now();
    }

    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    pub fn change_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn can_manage(&self, other: &User) -> bool {
        self.role.outranks(other.role)
    }

    pub fn can_create_role(&self, target: UserRole) -> bool {
        self.role.outranks(target)
    }

    // getters
    pub fn id(&self) -> &UserId {
        &self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
    pub fn role(&self) -> UserRole {
        self.role
    }
    pub fn linked_resident_id(&self) -> Option<&ResidentId> {
        self.linked_resident_id.as_ref()
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
