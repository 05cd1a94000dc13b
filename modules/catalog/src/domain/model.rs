use serde::{Deserialize, Serialize};

/// ISO 4217 currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Three upper-case ASCII letters, e.g. `USD`.
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Kind of account a user can open, e.g. `cash` or `credit_card`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountType {
    /// Lower-case ASCII letters, digits and underscores.
    pub code: String,
    pub name: String,
}

/// Unvalidated input for a new currency.
#[derive(Debug, Clone, Default)]
pub struct NewCurrency {
    pub code: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Fields of a currency that may change after creation.
#[derive(Debug, Clone, Default)]
pub struct CurrencyPatch {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Unvalidated input for a new account type.
#[derive(Debug, Clone, Default)]
pub struct NewAccountType {
    pub code: Option<String>,
    pub name: Option<String>,
}

impl From<Currency> for NewCurrency {
    fn from(c: Currency) -> Self {
        Self {
            code: Some(c.code),
            name: Some(c.name),
            symbol: c.symbol,
        }
    }
}

impl From<AccountType> for NewAccountType {
    fn from(a: AccountType) -> Self {
        Self {
            code: Some(a.code),
            name: Some(a.name),
        }
    }
}
