use serde::{Deserialize, Serialize};

use crate::domain::model::{AccountType, Currency, CurrencyPatch, NewAccountType, NewCurrency};

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrencyDto {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl From<Currency> for CurrencyDto {
    fn from(c: Currency) -> Self {
        Self {
            code: c.code,
            name: c.name,
            symbol: c.symbol,
        }
    }
}

/// Fields are optional here so that an absent one is reported as missing
/// input by the service rather than as a malformed body.
#[derive(Debug, Deserialize)]
pub struct CreateCurrencyRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl From<CreateCurrencyRequest> for NewCurrency {
    fn from(req: CreateCurrencyRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            symbol: req.symbol,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCurrencyRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl From<UpdateCurrencyRequest> for CurrencyPatch {
    fn from(req: UpdateCurrencyRequest) -> Self {
        Self {
            name: req.name,
            symbol: req.symbol,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountTypeDto {
    pub code: String,
    pub name: String,
}

impl From<AccountType> for AccountTypeDto {
    fn from(a: AccountType) -> Self {
        Self {
            code: a.code,
            name: a.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountTypeRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<CreateAccountTypeRequest> for NewAccountType {
    fn from(req: CreateAccountTypeRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
        }
    }
}
