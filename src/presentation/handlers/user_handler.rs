use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError,
        models::user::{User, UserId, UserRole},
        repositories::user_repository::UserRepository,
        services::{password_service::PasswordHasher, token_service::TokenService},
    },
    presentation::{error::ApiError, handlers::authenticate},
    usecase::{
        change_password_usecase::ChangePasswordUsecase,
        change_user_role_usecase::ChangeUserRoleUsecase,
        deactivate_user_usecase::DeactivateUserUsecase,
        list_users_usecase::{ListUsersUsecase, UserFilter},
        login_usecase::LoginUsecase,
        register_user_usecase::{NewUser, RegisterUserUsecase},
        reset_password_usecase::ResetPasswordUsecase,
        setup_usecase::SetupUsecase,
    },
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};

// Request

/// json for login request
#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// json for first-run setup request
#[derive(Serialize, Deserialize)]
pub struct SetupRequest {
    pub username: String,
    pub password: String,
}

/// json for account creation request
#[derive(Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub linked_resident_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}

/// query string for the account listing
#[derive(Serialize, Deserialize, Default)]
pub struct ListUsersQuery {
    pub role: Option<UserRole>,
    #[serde(default)]
    pub active_only: bool,
}

// Response

/// json for login response
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub linked_resident_id: Option<String>,
    pub is_active: bool,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            role: user.role(),
            linked_resident_id: user.linked_resident_id().map(|id| id.as_str().to_string()),
            is_active: user.is_active(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct SetupStatus {
    pub needs_setup: bool,
}

/* Router Function and Handler Function */

/// Use cases served by the account router
pub struct UserUsecases<U: UserRepository, P: PasswordHasher, T: TokenService> {
    pub setup: SetupUsecase<U, P>,
    pub login: LoginUsecase<U, P, T>,
    pub register: RegisterUserUsecase<U, P>,
    pub change_password: ChangePasswordUsecase<U, P>,
    pub reset_password: ResetPasswordUsecase<U, P>,
    pub deactivate: DeactivateUserUsecase<U>,
    pub change_role: ChangeUserRoleUsecase<U>,
    pub list_users: ListUsersUsecase<U>,
}

/// function return Router object
/// Suppose to be nested by main router
pub fn create_user_router<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    usecases: UserUsecases<U, P, T>,
    token_service: T,
) -> Router {
    let state = AppState {
        setup_service: Arc::new(usecases.setup),
        login_service: Arc::new(usecases.login),
        register_service: Arc::new(usecases.register),
        change_password_service: Arc::new(usecases.change_password),
        reset_password_service: Arc::new(usecases.reset_password),
        deactivate_service: Arc::new(usecases.deactivate),
        change_role_service: Arc::new(usecases.change_role),
        list_users_service: Arc::new(usecases.list_users),
        token_service,
    };

    Router::new()
        .route("/setup", get(setup_status::<U, P, T>).post(setup::<U, P, T>))
        .route("/login", post(login::<U, P, T>))
        .route(
            "/users",
            get(list_users::<U, P, T>).post(create_user::<U, P, T>),
        )
        .route("/users/{id}/password", put(change_password::<U, P, T>))
        .route("/users/{id}/password/reset", put(reset_password::<U, P, T>))
        .route("/users/{id}/role", put(change_role::<U, P, T>))
        .route("/users/{id}/deactivate", put(deactivate_user::<U, P, T>))
        .route("/users/{id}/reactivate", put(reactivate_user::<U, P, T>))
        .with_state(state)
}

pub struct AppState<U: UserRepository, P: PasswordHasher, T: TokenService> {
    pub setup_service: Arc<SetupUsecase<U, P>>,
    pub login_service: Arc<LoginUsecase<U, P, T>>,
    pub register_service: Arc<RegisterUserUsecase<U, P>>,
    pub change_password_service: Arc<ChangePasswordUsecase<U, P>>,
    pub reset_password_service: Arc<ResetPasswordUsecase<U, P>>,
    pub deactivate_service: Arc<DeactivateUserUsecase<U>>,
    pub change_role_service: Arc<ChangeUserRoleUsecase<U>>,
    pub list_users_service: Arc<ListUsersUsecase<U>>,
    pub token_service: T,
}

impl<U: UserRepository, P: PasswordHasher, T: TokenService> Clone for AppState<U, P, T> {
    fn clone(&self) -> Self {
        Self {
            setup_service: Arc::clone(&self.setup_service),
            login_service: Arc::clone(&self.login_service),
            register_service: Arc::clone(&self.register_service),
            change_password_service: Arc::clone(&self.change_password_service),
            reset_password_service: Arc::clone(&self.reset_password_service),
            deactivate_service: Arc::clone(&self.deactivate_service),
            change_role_service: Arc::clone(&self.change_role_service),
            list_users_service: Arc::clone(&self.list_users_service),
            token_service: self.token_service.clone(),
        }
    }
}

impl<U: UserRepository, P: PasswordHasher, T: TokenService> AppState<U, P, T> {
    fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, DomainError> {
        authenticate(&self.token_service, headers)
    }
}

// handler function

/// handler function for setup status
async fn setup_status<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
) -> Result<impl IntoResponse, ApiError> {
    let needs_setup = state.setup_service.needs_setup().await?;
    Ok(Json(SetupStatus { needs_setup }))
}

/// handler function for first-run setup
async fn setup<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    Json(payload): Json<SetupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .setup_service
        .execute(payload.username, payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(UserInfo::from(user))))
}

/// handler function for login
async fn login<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_service
        .login(payload.username, payload.password)
        .await?;

    let response = LoginResponse {
        token: result.token,
        user: result.user.into(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// handler function for account creation
async fn create_user<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    headers: HeaderMap,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = state.authenticate(&headers)?;
    let input = NewUser {
        username: payload.username,
        password: payload.password,
        role: payload.role,
        linked_resident_id: payload.linked_resident_id,
    };

    let user = state.register_service.create_user(&actor_id, input).await?;
    Ok((StatusCode::CREATED, Json(UserInfo::from(user))))
}

/// handler function for a user changing their own password
async fn change_password<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = state.authenticate(&headers)?;
    let user_id = UserId::parse(&id)?;

    state
        .change_password_service
        .change_password(&actor_id, &user_id, payload.current_password, payload.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// handler function for resetting a subordinate's password
async fn reset_password<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = state.authenticate(&headers)?;
    let target_id = UserId::parse(&id)?;

    state
        .reset_password_service
        .reset_password(&actor_id, &target_id, payload.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// handler function for the account listing
async fn list_users<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    headers: HeaderMap,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = state.authenticate(&headers)?;
    let filter = UserFilter {
        role: query.role,
        active_only: query.active_only,
    };

    let users = state.list_users_service.list(&actor_id, filter).await?;
    let body: Vec<UserInfo> = users.into_iter().map(UserInfo::from).collect();
    Ok(Json(body))
}

/// handler function for moving a subordinate to another role
async fn change_role<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<ChangeRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = state.authenticate(&headers)?;
    let target_id = UserId::parse(&id)?;

    state
        .change_role_service
        .change_role(&actor_id, &target_id, payload.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn deactivate_user<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = state.authenticate(&headers)?;
    let target_id = UserId::parse(&id)?;

    state.deactivate_service.deactivate(&actor_id, &target_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reactivate_user<
    U: UserRepository + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    State(state): State<AppState<U, P, T>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let actor_id = state.authenticate(&headers)?;
    let target_id = UserId::parse(&id)?;

    state.deactivate_service.reactivate(&actor_id, &target_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
