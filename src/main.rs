mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::Router;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    domain::{
        repositories::user_registration_repository::UserRegistrationRepository,
        services::password_service::PasswordHasher,
    },
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher,
        user_registration_repository::SeaOrmUserRegistrationRepository,
    },
    presentation::handlers::user_handler::create_auth_router,
    usecase::register_user_usecase::RegisterUserUsecase,
};

fn create_app<
    R: UserRegistrationRepository + Send + Sync + 'static,
    P: PasswordHasher + Send + Sync + 'static,
>(
    register_user_usecase: RegisterUserUsecase<R, P>,
) -> Router {
    Router::new()
        .nest("/api/auth", create_auth_router(register_user_usecase))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    Migrator::up(&db, None).await?;
    info!("database schema up to date");

    let registration_repository = SeaOrmUserRegistrationRepository::new(db);
    let password_hasher = Argon2PasswordHasher::new(&config.hashing)?;
    let register_user_usecase = RegisterUserUsecase::new(registration_repository, password_hasher);

    let app = create_app(register_user_usecase);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
