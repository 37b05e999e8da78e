mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    infrastructure::{
        in_memory_user_repository::InMemoryUserRepository,
        smtp_mail_provider::SmtpMailProvider, user_repository::SeaOrmUserRepository,
        uuid_id_generator::UuidIdGenerator,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::create_user_usecase::CreateUserUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional, real environment variables win
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let mail_provider = SmtpMailProvider::new(&config.smtp)?;
    let id_generator = UuidIdGenerator::new();

    let user_router = match &config.database {
        Some(database) => {
            let mut opt = ConnectOptions::new(database.url.clone());
            opt.max_connections(database.max_connections)
                .min_connections(1)
                .sqlx_logging(true);

            let db = Database::connect(opt).await?;
            let user_repository = SeaOrmUserRepository::new(db);
            user_repository.ensure_schema().await?;
            tracing::info!("users stored in database");

            create_user_router(CreateUserUsecase::new(
                user_repository,
                mail_provider,
                id_generator,
            ))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory");
            create_user_router(CreateUserUsecase::new(
                InMemoryUserRepository::new(),
                mail_provider,
                id_generator,
            ))
        }
    };

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .merge(user_router);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
