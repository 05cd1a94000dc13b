use std::sync::Arc;

use finance_errors::{ServiceError, ServiceResult};

use super::model::{AccountType, Currency, CurrencyPatch, NewAccountType, NewCurrency};
use super::repo::CatalogRepository;
use crate::config::CatalogConfig;

const MAX_SYMBOL_LENGTH: usize = 8;
const MAX_ACCOUNT_TYPE_CODE_LENGTH: usize = 32;

pub struct ServiceConfig {
    pub max_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
        }
    }
}

impl From<&CatalogConfig> for ServiceConfig {
    fn from(cfg: &CatalogConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
        }
    }
}

/// Catalog use cases. Every failure is a [`ServiceError`] whose category
/// decides the HTTP status at the boundary.
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
    config: ServiceConfig,
}

impl CatalogService {
    #[must_use]
    pub fn new(repo: Arc<dyn CatalogRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// # Errors
    /// `Unclassified` if storage fails.
    pub async fn list_currencies(&self) -> ServiceResult<Vec<Currency>> {
        Ok(self.repo.list_currencies().await?)
    }

    /// # Errors
    /// `InvalidInput` for a malformed code, `NotFound` for an unknown one.
    pub async fn get_currency(&self, code: &str) -> ServiceResult<Currency> {
        validate_currency_code(code)?;
        self.repo
            .find_currency(code)
            .await?
            .ok_or_else(|| currency_not_found(code))
    }

    /// # Errors
    /// `MissingRequiredInput` without a code or name, `InvalidInput` for
    /// malformed fields, `InvalidState` if the code is taken.
    pub async fn create_currency(&self, input: NewCurrency) -> ServiceResult<Currency> {
        let currency = self.validate_new_currency(input)?;

        if !self.repo.insert_currency(currency.clone()).await? {
            return Err(ServiceError::invalid_state(format!(
                "currency {} already exists",
                currency.code
            )));
        }

        tracing::info!(code = %currency.code, "Currency created");
        Ok(currency)
    }

    /// Changes name and/or symbol; an empty symbol clears it.
    ///
    /// # Errors
    /// `NotFound` for an unknown code, `MissingRequiredInput` for a blank
    /// name, `InvalidInput` for malformed fields.
    pub async fn update_currency(
        &self,
        code: &str,
        patch: CurrencyPatch,
    ) -> ServiceResult<Currency> {
        let CurrencyPatch { name, symbol } = patch;
        let mut currency = self.get_currency(code).await?;

        if let Some(name) = name {
            currency.name = self.validate_name(&required("name", Some(name.as_str()))?)?;
        }
        if let Some(symbol) = symbol {
            currency.symbol = validate_symbol(Some(&symbol))?;
        }

        if !self.repo.update_currency(currency.clone()).await? {
            return Err(currency_not_found(code));
        }

        tracing::info!(code = %currency.code, "Currency updated");
        Ok(currency)
    }

    /// # Errors
    /// `NotFound` if no currency has `code`.
    pub async fn delete_currency(&self, code: &str) -> ServiceResult<()> {
        validate_currency_code(code)?;
        if !self.repo.delete_currency(code).await? {
            return Err(currency_not_found(code));
        }

        tracing::info!(code, "Currency deleted");
        Ok(())
    }

    /// # Errors
    /// `Unclassified` if storage fails.
    pub async fn list_account_types(&self) -> ServiceResult<Vec<AccountType>> {
        Ok(self.repo.list_account_types().await?)
    }

    /// # Errors
    /// `InvalidInput` for a malformed code, `NotFound` for an unknown one.
    pub async fn get_account_type(&self, code: &str) -> ServiceResult<AccountType> {
        validate_account_type_code(code)?;
        self.repo
            .find_account_type(code)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("account type {code} not found")))
    }

    /// # Errors
    /// Same rules as [`Self::create_currency`].
    pub async fn create_account_type(&self, input: NewAccountType) -> ServiceResult<AccountType> {
        let account_type = self.validate_new_account_type(input)?;

        if !self.repo.insert_account_type(account_type.clone()).await? {
            return Err(ServiceError::invalid_state(format!(
                "account type {} already exists",
                account_type.code
            )));
        }

        tracing::info!(code = %account_type.code, "Account type created");
        Ok(account_type)
    }

    /// Checks a new currency without touching storage.
    ///
    /// # Errors
    /// The validation errors of [`Self::create_currency`].
    pub fn validate_new_currency(&self, input: NewCurrency) -> ServiceResult<Currency> {
        let NewCurrency { code, name, symbol } = input;
        let code = required("code", code.as_deref())?;
        validate_currency_code(&code)?;
        let name = self.validate_name(&required("name", name.as_deref())?)?;
        let symbol = validate_symbol(symbol.as_deref())?;

        Ok(Currency { code, name, symbol })
    }

    /// Checks a new account type without touching storage.
    ///
    /// # Errors
    /// The validation errors of [`Self::create_account_type`].
    pub fn validate_new_account_type(&self, input: NewAccountType) -> ServiceResult<AccountType> {
        let NewAccountType { code, name } = input;
        let code = required("code", code.as_deref())?;
        validate_account_type_code(&code)?;
        let name = self.validate_name(&required("name", name.as_deref())?)?;

        Ok(AccountType { code, name })
    }

    /// `name` is already trimmed and non-blank, see [`required`].
    fn validate_name(&self, name: &str) -> ServiceResult<String> {
        if name.chars().count() > self.config.max_name_length {
            return Err(ServiceError::invalid_input(format!(
                "name exceeds maximum length of {}",
                self.config.max_name_length
            )));
        }
        Ok(name.to_owned())
    }
}

/// Absent and blank values both count as missing.
fn required(field: &'static str, value: Option<&str>) -> ServiceResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| ServiceError::missing(field))
}

fn validate_currency_code(code: &str) -> ServiceResult<()> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ServiceError::invalid_input(format!(
            "currency code must be three upper-case letters, got '{code}'"
        )))
    }
}

fn validate_account_type_code(code: &str) -> ServiceResult<()> {
    let well_formed = !code.is_empty()
        && code.len() <= MAX_ACCOUNT_TYPE_CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');

    if well_formed {
        Ok(())
    } else {
        Err(ServiceError::invalid_input(format!(
            "account type code must be 1-{MAX_ACCOUNT_TYPE_CODE_LENGTH} lower-case letters, digits or underscores, got '{code}'"
        )))
    }
}

fn validate_symbol(symbol: Option<&str>) -> ServiceResult<Option<String>> {
    let Some(symbol) = symbol.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if symbol.chars().count() > MAX_SYMBOL_LENGTH {
        return Err(ServiceError::invalid_input(format!(
            "symbol exceeds maximum length of {MAX_SYMBOL_LENGTH}"
        )));
    }
    Ok(Some(symbol.to_owned()))
}

fn currency_not_found(code: &str) -> ServiceError {
    ServiceError::not_found(format!("currency {code} not found"))
}
