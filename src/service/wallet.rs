//! Wallet business rules: uniqueness of (owner, name), field validation and
//! merge semantics of partial updates, ownership on delete.

use crate::database::StoreError;
use crate::database::wallet::{Model as Wallet, NewWallet, WalletStore};
use crate::errors::wallet::WalletError;
use crate::models::wallets::{WalletCreateRequest, WalletUpdateRequest};

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 128;
const DESCRIPTION_MAX_LEN: usize = 256;
const CURRENCY_LEN: usize = 3;

#[derive(Debug)]
pub struct WalletService<S> {
    store: S,
}

impl<S: WalletStore> WalletService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All live wallets of one owner, most recently updated first.
    pub async fn list(&self, user_id: i64) -> Result<Vec<Wallet>, WalletError> {
        Ok(self.store.list_by_owner(user_id).await?)
    }

    /// Creates a wallet. The name must be free within the owner's scope;
    /// currency is stored upper-cased.
    pub async fn create(
        &self,
        user_id: i64,
        dto: WalletCreateRequest,
    ) -> Result<Wallet, WalletError> {
        validate_name(&dto.name)?;
        if let Some(description) = &dto.description {
            validate_description(description)?;
        }
        validate_currency(&dto.currency)?;

        if self.store.exists_with_name(user_id, &dto.name).await {
            return Err(WalletError::AlreadyExists);
        }

        let wallet = NewWallet {
            user_id,
            name: dto.name,
            description: dto.description,
            currency: dto.currency.to_uppercase(),
            initial_amount: dto.initial_amount,
        };

        // The existence check above is an early exit only; the partial unique
        // index stays authoritative under concurrent creates.
        match self.store.create(wallet).await {
            Err(StoreError::UniqueViolation) => Err(WalletError::AlreadyExists),
            result => Ok(result?),
        }
    }

    /// Partial update: at least one field must be supplied. Supplied fields
    /// are validated, merged into the current row and persisted as a full
    /// replace. Renaming a wallet to its own current name is a no-op.
    pub async fn update(
        &self,
        wallet_id: i64,
        user_id: i64,
        dto: WalletUpdateRequest,
    ) -> Result<Wallet, WalletError> {
        let mut wallet = match self.store.get_by_id(wallet_id).await {
            Err(StoreError::NotFound) => return Err(WalletError::NotFound),
            result => result?,
        };
        if wallet.user_id != user_id {
            return Err(WalletError::NotOwned);
        }
        if dto.is_empty() {
            return Err(WalletError::AtLeastOneFieldRequired);
        }

        if let Some(name) = dto.name {
            validate_name(&name)?;
            if name != wallet.name && self.store.exists_with_name(user_id, &name).await {
                return Err(WalletError::AlreadyExists);
            }
            wallet.name = name;
        }
        if let Some(description) = dto.description {
            validate_description(&description)?;
            wallet.description = Some(description);
        }
        if let Some(currency) = dto.currency {
            validate_currency(&currency)?;
            wallet.currency = currency.to_uppercase();
        }
        if let Some(initial_amount) = dto.initial_amount {
            wallet.initial_amount = initial_amount;
        }

        match self.store.save(&wallet).await {
            Err(StoreError::UniqueViolation) => Err(WalletError::AlreadyExists),
            result => Ok(result?),
        }
    }

    /// Soft-deletes a wallet after checking it belongs to the caller.
    pub async fn delete(&self, wallet_id: i64, user_id: i64) -> Result<(), WalletError> {
        if !self.store.belongs_to_owner(wallet_id, user_id).await {
            return Err(WalletError::NotOwned);
        }

        Ok(self.store.soft_delete(wallet_id).await?)
    }
}

fn validate_name(name: &str) -> Result<(), WalletError> {
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(WalletError::NameLength);
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), WalletError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(WalletError::DescriptionLength);
    }
    Ok(())
}

fn validate_currency(currency: &str) -> Result<(), WalletError> {
    if currency.chars().count() != CURRENCY_LEN {
        return Err(WalletError::Currency);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::dec;

    use super::*;
    use crate::database::wallet::MockWalletStore;

    fn stored_wallet(id: i64, user_id: i64, name: &str) -> Wallet {
        Wallet {
            id,
            user_id,
            name: name.to_owned(),
            description: Some("Description".to_owned()),
            currency: "USD".to_owned(),
            initial_amount: dec!(100.00),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn create_dto(name: &str, currency: &str) -> WalletCreateRequest {
        WalletCreateRequest {
            name: name.to_owned(),
            description: Some("A test wallet".to_owned()),
            currency: currency.to_owned(),
            initial_amount: dec!(123.45),
        }
    }

    #[tokio::test]
    async fn list_passes_wallets_through() {
        let mut store = MockWalletStore::new();
        let wallets = vec![stored_wallet(1, 1, "Main"), stored_wallet(2, 1, "Savings")];
        let expected = wallets.clone();

        store
            .expect_list_by_owner()
            .withf(|&user_id| user_id == 1)
            .times(1)
            .returning(move |_| Ok(wallets.clone()));

        let service = WalletService::new(store);
        let actual = service.list(1).await.unwrap();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn create_stores_currency_upper_cased() {
        let mut store = MockWalletStore::new();

        store
            .expect_exists_with_name()
            .withf(|&user_id, name| user_id == 1 && name == "Main")
            .times(1)
            .returning(|_, _| false);
        store
            .expect_create()
            .withf(|wallet| wallet.currency == "USD" && wallet.name == "Main")
            .times(1)
            .returning(|wallet| {
                Ok(Wallet {
                    id: 1,
                    user_id: wallet.user_id,
                    name: wallet.name,
                    description: wallet.description,
                    currency: wallet.currency,
                    initial_amount: wallet.initial_amount,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                    deleted_at: None,
                })
            });

        let service = WalletService::new(store);
        let wallet = service.create(1, create_dto("Main", "usd")).await.unwrap();

        assert_eq!(wallet.currency, "USD");
        assert_eq!(wallet.initial_amount, dec!(123.45));
    }

    #[tokio::test]
    async fn create_fails_when_name_is_taken() {
        let mut store = MockWalletStore::new();

        store
            .expect_exists_with_name()
            .times(1)
            .returning(|_, _| true);

        let service = WalletService::new(store);
        let err = service.create(1, create_dto("Main", "USD")).await.unwrap_err();

        assert!(matches!(err, WalletError::AlreadyExists));
    }

    #[tokio::test]
    async fn create_translates_unique_violation_from_store() {
        let mut store = MockWalletStore::new();

        store
            .expect_exists_with_name()
            .times(1)
            .returning(|_, _| false);
        store
            .expect_create()
            .times(1)
            .returning(|_| Err(StoreError::UniqueViolation));

        let service = WalletService::new(store);
        let err = service.create(1, create_dto("Main", "USD")).await.unwrap_err();

        assert!(matches!(err, WalletError::AlreadyExists));
    }

    #[tokio::test]
    async fn create_validates_field_lengths_before_touching_the_store() {
        let service = WalletService::new(MockWalletStore::new());

        let err = service.create(1, create_dto("ab", "USD")).await.unwrap_err();
        assert!(matches!(err, WalletError::NameLength));

        let err = service.create(1, create_dto("Main", "US")).await.unwrap_err();
        assert!(matches!(err, WalletError::Currency));

        let mut dto = create_dto("Main", "USD");
        dto.description = Some("d".repeat(257));
        let err = service.create(1, dto).await.unwrap_err();
        assert!(matches!(err, WalletError::DescriptionLength));
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let mut store = MockWalletStore::new();
        let current = stored_wallet(5, 9, "Main");
        let previous_updated_at = current.updated_at;

        store
            .expect_get_by_id()
            .withf(|&id| id == 5)
            .times(1)
            .returning(move |_| Ok(current.clone()));
        store
            .expect_save()
            .withf(|wallet| {
                wallet.description.as_deref() == Some("new desc")
                    && wallet.name == "Main"
                    && wallet.currency == "USD"
                    && wallet.initial_amount == dec!(100.00)
            })
            .times(1)
            .returning(|wallet| {
                Ok(Wallet {
                    updated_at: Utc::now() + Duration::seconds(1),
                    ..wallet.clone()
                })
            });

        let service = WalletService::new(store);
        let dto = WalletUpdateRequest {
            description: Some("new desc".to_owned()),
            ..Default::default()
        };
        let updated = service.update(5, 9, dto).await.unwrap();

        assert_eq!(updated.description.as_deref(), Some("new desc"));
        assert!(updated.updated_at > previous_updated_at);
    }

    #[tokio::test]
    async fn update_requires_at_least_one_field() {
        let mut store = MockWalletStore::new();

        store
            .expect_get_by_id()
            .times(1)
            .returning(|_| Ok(stored_wallet(1, 1, "Main")));

        let service = WalletService::new(store);
        let err = service
            .update(1, 1, WalletUpdateRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::AtLeastOneFieldRequired));
    }

    #[tokio::test]
    async fn update_fails_for_unknown_wallet() {
        let mut store = MockWalletStore::new();

        store
            .expect_get_by_id()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let service = WalletService::new(store);
        let dto = WalletUpdateRequest {
            name: Some("Renamed".to_owned()),
            ..Default::default()
        };
        let err = service.update(1, 1, dto).await.unwrap_err();

        assert!(matches!(err, WalletError::NotFound));
    }

    #[tokio::test]
    async fn update_fails_for_non_owner() {
        let mut store = MockWalletStore::new();

        store
            .expect_get_by_id()
            .times(1)
            .returning(|_| Ok(stored_wallet(5, 2, "Main")));

        let service = WalletService::new(store);
        let dto = WalletUpdateRequest {
            description: Some("new desc".to_owned()),
            ..Default::default()
        };
        let err = service.update(5, 9, dto).await.unwrap_err();

        assert!(matches!(err, WalletError::NotOwned));
    }

    #[tokio::test]
    async fn update_accepts_name_boundary_lengths() {
        for len in [NAME_MIN_LEN, NAME_MAX_LEN] {
            let mut store = MockWalletStore::new();

            store
                .expect_get_by_id()
                .returning(|_| Ok(stored_wallet(1, 1, "Main")));
            store.expect_exists_with_name().returning(|_, _| false);
            store.expect_save().returning(|wallet| Ok(wallet.clone()));

            let service = WalletService::new(store);
            let dto = WalletUpdateRequest {
                name: Some("n".repeat(len)),
                ..Default::default()
            };
            let updated = service.update(1, 1, dto).await.unwrap();

            assert_eq!(updated.name.chars().count(), len);
        }
    }

    #[tokio::test]
    async fn update_rejects_name_lengths_outside_bounds() {
        for len in [NAME_MIN_LEN - 1, NAME_MAX_LEN + 1] {
            let mut store = MockWalletStore::new();

            store
                .expect_get_by_id()
                .returning(|_| Ok(stored_wallet(1, 1, "Main")));

            let service = WalletService::new(store);
            let dto = WalletUpdateRequest {
                name: Some("n".repeat(len)),
                ..Default::default()
            };
            let err = service.update(1, 1, dto).await.unwrap_err();

            assert!(matches!(err, WalletError::NameLength));
        }
    }

    #[tokio::test]
    async fn update_checks_description_boundary() {
        let mut store = MockWalletStore::new();

        store
            .expect_get_by_id()
            .returning(|_| Ok(stored_wallet(1, 1, "Main")));
        store.expect_save().returning(|wallet| Ok(wallet.clone()));

        let service = WalletService::new(store);

        let dto = WalletUpdateRequest {
            description: Some("d".repeat(DESCRIPTION_MAX_LEN)),
            ..Default::default()
        };
        assert!(service.update(1, 1, dto).await.is_ok());

        let dto = WalletUpdateRequest {
            description: Some("d".repeat(DESCRIPTION_MAX_LEN + 1)),
            ..Default::default()
        };
        let err = service.update(1, 1, dto).await.unwrap_err();
        assert!(matches!(err, WalletError::DescriptionLength));
    }

    #[tokio::test]
    async fn update_requires_three_character_currency_and_upper_cases_it() {
        for currency in ["US", "USDT"] {
            let mut store = MockWalletStore::new();

            store
                .expect_get_by_id()
                .returning(|_| Ok(stored_wallet(1, 1, "Main")));

            let service = WalletService::new(store);
            let dto = WalletUpdateRequest {
                currency: Some(currency.to_owned()),
                ..Default::default()
            };
            let err = service.update(1, 1, dto).await.unwrap_err();

            assert!(matches!(err, WalletError::Currency));
        }

        let mut store = MockWalletStore::new();
        store
            .expect_get_by_id()
            .returning(|_| Ok(stored_wallet(1, 1, "Main")));
        store
            .expect_save()
            .withf(|wallet| wallet.currency == "EUR")
            .returning(|wallet| Ok(wallet.clone()));

        let service = WalletService::new(store);
        let dto = WalletUpdateRequest {
            currency: Some("eur".to_owned()),
            ..Default::default()
        };
        let updated = service.update(1, 1, dto).await.unwrap();

        assert_eq!(updated.currency, "EUR");
    }

    #[tokio::test]
    async fn update_allows_renaming_to_the_current_name() {
        let mut store = MockWalletStore::new();

        store
            .expect_get_by_id()
            .times(1)
            .returning(|_| Ok(stored_wallet(1, 1, "Main")));
        // No exists_with_name expectation: the duplicate check is skipped for
        // a no-op rename.
        store
            .expect_save()
            .times(1)
            .returning(|wallet| Ok(wallet.clone()));

        let service = WalletService::new(store);
        let dto = WalletUpdateRequest {
            name: Some("Main".to_owned()),
            ..Default::default()
        };
        let updated = service.update(1, 1, dto).await.unwrap();

        assert_eq!(updated.name, "Main");
    }

    #[tokio::test]
    async fn update_rejects_duplicate_name() {
        let mut store = MockWalletStore::new();

        store
            .expect_get_by_id()
            .times(1)
            .returning(|_| Ok(stored_wallet(1, 1, "Main")));
        store
            .expect_exists_with_name()
            .withf(|&user_id, name| user_id == 1 && name == "Savings")
            .times(1)
            .returning(|_, _| true);

        let service = WalletService::new(store);
        let dto = WalletUpdateRequest {
            name: Some("Savings".to_owned()),
            ..Default::default()
        };
        let err = service.update(1, 1, dto).await.unwrap_err();

        assert!(matches!(err, WalletError::AlreadyExists));
    }

    #[tokio::test]
    async fn update_accepts_any_initial_amount() {
        let mut store = MockWalletStore::new();

        store
            .expect_get_by_id()
            .returning(|_| Ok(stored_wallet(1, 1, "Main")));
        store
            .expect_save()
            .withf(|wallet| wallet.initial_amount == dec!(-50.00))
            .returning(|wallet| Ok(wallet.clone()));

        let service = WalletService::new(store);
        let dto = WalletUpdateRequest {
            initial_amount: Some(dec!(-50.00)),
            ..Default::default()
        };

        assert!(service.update(1, 1, dto).await.is_ok());
    }

    #[tokio::test]
    async fn delete_soft_deletes_owned_wallet() {
        let mut store = MockWalletStore::new();

        store
            .expect_belongs_to_owner()
            .withf(|&id, &user_id| id == 1 && user_id == 1)
            .times(1)
            .returning(|_, _| true);
        store
            .expect_soft_delete()
            .withf(|&id| id == 1)
            .times(1)
            .returning(|_| Ok(()));

        let service = WalletService::new(store);

        assert!(service.delete(1, 1).await.is_ok());
    }

    #[tokio::test]
    async fn delete_fails_for_non_owner_without_touching_the_row() {
        let mut store = MockWalletStore::new();

        store
            .expect_belongs_to_owner()
            .times(1)
            .returning(|_, _| false);
        // No soft_delete expectation: the row must not be mutated.

        let service = WalletService::new(store);
        let err = service.delete(1, 2).await.unwrap_err();

        assert!(matches!(err, WalletError::NotOwned));
    }
}
