mod config;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;
mod usecase;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    domain::{
        repositories::user_repository::UserRepository,
        services::{
            document_service::DocumentGeneratorProvider, password_service::PasswordHasher,
            token_service::TokenService,
        },
    },
    infrastructure::{
        bcrypt_password_hasher::BcryptPasswordHasher,
        document_generators::DocumentGeneratorFactory,
        jwt_token_service::JwtTokenService,
        user_repository::{SeaOrmUserRepository, create_schema},
    },
    presentation::handlers::{
        document_handler::create_document_router,
        user_handler::{UserUsecases, create_user_router},
    },
    usecase::{
        change_password_usecase::ChangePasswordUsecase,
        change_user_role_usecase::ChangeUserRoleUsecase,
        deactivate_user_usecase::DeactivateUserUsecase, hashing_gate::HashingGate,
        list_users_usecase::ListUsersUsecase, login_usecase::LoginUsecase,
        register_user_usecase::RegisterUserUsecase,
        render_document_usecase::RenderDocumentUsecase,
        reset_password_usecase::ResetPasswordUsecase, setup_usecase::SetupUsecase,
    },
};

/// Wire the use cases over the given adapters into the full application router
fn build_app<U, P, T, F>(
    user_repository: U,
    hashing: HashingGate<P>,
    token_service: T,
    generators: F,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
    F: DocumentGeneratorProvider + 'static,
{
    let usecases = UserUsecases {
        setup: SetupUsecase::new(user_repository.clone(), hashing.clone()),
        login: LoginUsecase::new(user_repository.clone(), hashing.clone(), token_service.clone()),
        register: RegisterUserUsecase::new(user_repository.clone(), hashing.clone()),
        change_password: ChangePasswordUsecase::new(user_repository.clone(), hashing.clone()),
        reset_password: ResetPasswordUsecase::new(user_repository.clone(), hashing),
        deactivate: DeactivateUserUsecase::new(user_repository.clone()),
        change_role: ChangeUserRoleUsecase::new(user_repository.clone()),
        list_users: ListUsersUsecase::new(user_repository),
    };

    Router::new()
        .route("/", get(|| async { "Barangay records service" }))
        .nest(
            "/api",
            create_user_router(usecases, token_service.clone()).merge(create_document_router(
                RenderDocumentUsecase::new(generators),
                token_service,
            )),
        )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    info!(?config, "starting barangay records service");

    // a hasher that cannot hash must stop the process before it serves logins
    let password_hasher = BcryptPasswordHasher::new(config.bcrypt_cost)?;
    password_hasher.self_check()?;
    info!(cost = password_hasher.cost(), "password hasher self check passed");

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);
    let db = Database::connect(opt).await?;
    create_schema(&db).await?;

    let app = build_app(
        SeaOrmUserRepository::new(db),
        HashingGate::new(password_hasher, config.max_concurrent_hashes),
        JwtTokenService::with_expiration(config.jwt_secret.clone(), config.token_expiration_hours),
        DocumentGeneratorFactory::new(),
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
