use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

use crate::database::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub initial_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a wallet row. Ids and timestamps are generated by the
/// database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWallet {
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub initial_amount: Decimal,
}

/// Flat persistence contract the wallet service works against. All queries
/// ignore soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Whether a live wallet with this name already exists for the owner.
    async fn exists_with_name(&self, user_id: i64, name: &str) -> bool;

    async fn get_by_id(&self, id: i64) -> Result<Model>;

    /// False on ownership mismatch and on any lookup failure.
    async fn belongs_to_owner(&self, id: i64, user_id: i64) -> bool;

    /// All live wallets of one owner, most recently updated first.
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Model>>;

    async fn create(&self, wallet: NewWallet) -> Result<Model>;

    /// Full-row replace. Refreshes `updated_at`.
    async fn save(&self, wallet: &Model) -> Result<Model>;

    async fn soft_delete(&self, id: i64) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PgWalletStore {
    pool: PgPool,
}

impl PgWalletStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WalletStore for PgWalletStore {
    async fn exists_with_name(&self, user_id: i64, name: &str) -> bool {
        let q = "SELECT EXISTS(SELECT 1 FROM wallets WHERE user_id = $1 AND name = $2 AND deleted_at IS NULL)";

        sqlx::query_scalar::<Postgres, bool>(q)
            .bind(user_id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .unwrap_or(false)
    }

    async fn get_by_id(&self, id: i64) -> Result<Model> {
        let q = "SELECT * FROM wallets WHERE id = $1 AND deleted_at IS NULL";

        let wallet = sqlx::query_as(q).bind(id).fetch_one(&self.pool).await?;

        Ok(wallet)
    }

    async fn belongs_to_owner(&self, id: i64, user_id: i64) -> bool {
        let q = "SELECT EXISTS(SELECT 1 FROM wallets WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL)";

        sqlx::query_scalar::<Postgres, bool>(q)
            .bind(id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .unwrap_or(false)
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Model>> {
        let q = "SELECT * FROM wallets WHERE user_id = $1 AND deleted_at IS NULL ORDER BY updated_at DESC";

        let wallets = sqlx::query_as(q).bind(user_id).fetch_all(&self.pool).await?;

        Ok(wallets)
    }

    async fn create(&self, wallet: NewWallet) -> Result<Model> {
        let q = "INSERT INTO wallets (user_id, name, description, currency, initial_amount) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING *";

        let wallet = sqlx::query_as(q)
            .bind(wallet.user_id)
            .bind(wallet.name)
            .bind(wallet.description)
            .bind(wallet.currency)
            .bind(wallet.initial_amount)
            .fetch_one(&self.pool)
            .await?;

        Ok(wallet)
    }

    async fn save(&self, wallet: &Model) -> Result<Model> {
        let q = "UPDATE wallets \
                 SET name = $2, description = $3, currency = $4, initial_amount = $5, updated_at = NOW() \
                 WHERE id = $1 AND deleted_at IS NULL RETURNING *";

        let wallet = sqlx::query_as(q)
            .bind(wallet.id)
            .bind(&wallet.name)
            .bind(&wallet.description)
            .bind(&wallet.currency)
            .bind(wallet.initial_amount)
            .fetch_one(&self.pool)
            .await?;

        Ok(wallet)
    }

    async fn soft_delete(&self, id: i64) -> Result<()> {
        let q = "UPDATE wallets SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL";

        let result = sqlx::query(q).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
