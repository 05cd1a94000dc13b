use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, OriginalUri, Path};
use finance_kit::api::prelude::*;

use super::dto::{
    AccountTypeDto, CreateAccountTypeRequest, CreateCurrencyRequest, CurrencyDto,
    UpdateCurrencyRequest,
};
use crate::domain::service::CatalogService;

pub async fn list_currencies(
    Extension(svc): Extension<Arc<CatalogService>>,
) -> ApiResult<Json<Vec<CurrencyDto>>> {
    let currencies = svc.list_currencies().await?;
    Ok(Json(currencies.into_iter().map(Into::into).collect()))
}

pub async fn get_currency(
    Extension(svc): Extension<Arc<CatalogService>>,
    Path(code): Path<String>,
) -> ApiResult<Json<CurrencyDto>> {
    let currency = svc.get_currency(&code).await?;
    Ok(Json(currency.into()))
}

pub async fn create_currency(
    Extension(svc): Extension<Arc<CatalogService>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<CreateCurrencyRequest>, JsonRejection>,
) -> ApiResult<Created<CurrencyDto>> {
    let Json(req) = body?;
    let currency = svc.create_currency(req.into()).await?;
    let code = currency.code.clone();
    Ok(Created::under(&uri, &code, CurrencyDto::from(currency)))
}

pub async fn update_currency(
    Extension(svc): Extension<Arc<CatalogService>>,
    Path(code): Path<String>,
    body: Result<Json<UpdateCurrencyRequest>, JsonRejection>,
) -> ApiResult<Json<CurrencyDto>> {
    let Json(req) = body?;
    let currency = svc.update_currency(&code, req.into()).await?;
    Ok(Json(currency.into()))
}

pub async fn delete_currency(
    Extension(svc): Extension<Arc<CatalogService>>,
    Path(code): Path<String>,
) -> ApiResult<StatusCode> {
    svc.delete_currency(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_account_types(
    Extension(svc): Extension<Arc<CatalogService>>,
) -> ApiResult<Json<Vec<AccountTypeDto>>> {
    let account_types = svc.list_account_types().await?;
    Ok(Json(account_types.into_iter().map(Into::into).collect()))
}

pub async fn get_account_type(
    Extension(svc): Extension<Arc<CatalogService>>,
    Path(code): Path<String>,
) -> ApiResult<Json<AccountTypeDto>> {
    let account_type = svc.get_account_type(&code).await?;
    Ok(Json(account_type.into()))
}

pub async fn create_account_type(
    Extension(svc): Extension<Arc<CatalogService>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<CreateAccountTypeRequest>, JsonRejection>,
) -> ApiResult<Created<AccountTypeDto>> {
    let Json(req) = body?;
    let account_type = svc.create_account_type(req.into()).await?;
    let code = account_type.code.clone();
    Ok(Created::under(&uri, &code, AccountTypeDto::from(account_type)))
}
