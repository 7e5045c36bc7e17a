pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod routes;
pub mod service;

use crate::config::Config;
use crate::database::wallet::PgWalletStore;
use crate::service::wallet::WalletService;

#[derive(Debug)]
pub struct AppState {
    pub wallets: WalletService<PgWalletStore>,
    pub config: Config,
}
