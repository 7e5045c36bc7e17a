//! Wire-level wallet DTOs. The owner id never comes from these bodies; the
//! handlers inject it from the authenticated token.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub currency: String,
    pub initial_amount: Decimal,
}

/// Partial update body. An absent field and an explicit `null` both mean
/// "leave unchanged".
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub initial_amount: Option<Decimal>,
}

impl WalletUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.currency.is_none()
            && self.initial_amount.is_none()
    }
}
