use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Schema, SqlErr,
};
use tracing::debug;

use crate::{
    domain::{
        error::RepositoryError,
        models::{
            credential::HashedPassword,
            resident::ResidentId,
            user::{User, UserId, UserRole},
        },
        repositories::user_repository::UserRepository,
    },
    infrastructure::entity::users,
};

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Create the `users` table when it does not exist yet
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(users::Entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    Ok(())
}

fn to_domain(model: users::Model) -> Result<User, RepositoryError> {
    let role = model
        .role
        .parse::<UserRole>()
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

    let linked_resident_id = model
        .linked_resident_id
        .map(ResidentId::new)
        .transpose()
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

    Ok(User::reconstruct(
        UserId::from_uuid(model.id),
        model.username,
        HashedPassword::new(model.password_hash),
        role,
        linked_resident_id,
        model.is_active,
        model.created_at,
        model.last_login_at,
        model.updated_at,
    ))
}

fn to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(*user.id().as_uuid()),
        username: Set(user.username().to_string()),
        password_hash: Set(user.password_hash().as_str().to_string()),
        role: Set(user.role().as_str().to_string()),
        linked_resident_id: Set(user.linked_resident_id().map(|id| id.as_str().to_string())),
        is_active: Set(user.is_active()),
        created_at: Set(user.created_at()),
        last_login_at: Set(user.last_login_at()),
        updated_at: Set(user.updated_at()),
    }
}

fn db_error(e: DbErr) -> RepositoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Duplicate(detail),
        _ => RepositoryError::DatabaseError(e.to_string()),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let exists = users::Entity::find_by_id(*user.id().as_uuid())
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();

        let model = to_active_model(user);
        if exists {
            model.update(&self.db).await.map_err(db_error)?;
        } else {
            model.insert(&self.db).await.map_err(db_error)?;
        }
        debug!(user_id = %user.id(), inserted = !exists, "saved user");
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        users::Entity::find_by_id(*id.as_uuid())
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(to_domain)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        users::Entity::find()
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn has_super_admin(&self) -> Result<bool, RepositoryError> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::SuperAdmin.as_str()))
            .filter(users::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(db_error)?;
        Ok(count > 0)
    }
}
