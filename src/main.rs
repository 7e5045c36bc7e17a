use actix_web::{App, HttpServer, middleware, web};
use sqlx::postgres::PgPool;

use portmonetka_wallet::config::{Config, DEFAULT_CONFIG_PATH};
use portmonetka_wallet::database::wallet::PgWalletStore;
use portmonetka_wallet::errors::PortmonetkaError;
use portmonetka_wallet::service::wallet::WalletService;
use portmonetka_wallet::{AppState, routes};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::load(DEFAULT_CONFIG_PATH)?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .init();

    let pool = PgPool::connect(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let state = web::Data::new(AppState {
        wallets: WalletService::new(PgWalletStore::new(pool)),
        config: config.clone(),
    });

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| PortmonetkaError::JsonPayload(err).into()),
            )
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(routes::config)
    })
    .bind(&config.server_url)?
    .run();

    http_server.await?;

    Ok(())
}
