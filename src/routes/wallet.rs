use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::auth::AuthenticatedUser;
use crate::models::misc::RequestUuid;
use crate::models::responses::ApiResponse;
use crate::models::wallets::{WalletCreateRequest, WalletUpdateRequest};
use crate::{AppState, errors::PortmonetkaError};

#[get("")]
async fn wallet_list(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    auth: AuthenticatedUser,
    request_uuid: RequestUuid,
) -> Result<HttpResponse, PortmonetkaError> {
    let user_id = auth.authorize(path.into_inner())?;

    let wallets = state.wallets.list(user_id).await?;

    tracing::info!(
        action = "GetWallets",
        user_id,
        request_uuid = %request_uuid,
        "wallets retrieved"
    );

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: Some("Wallets retrieved"),
        data: Some(wallets),
        request_uuid: Some(request_uuid.as_str()),
        ..Default::default()
    }))
}

#[post("")]
async fn wallet_create(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    auth: AuthenticatedUser,
    request_uuid: RequestUuid,
    body: web::Json<WalletCreateRequest>,
) -> Result<HttpResponse, PortmonetkaError> {
    let user_id = auth.authorize(path.into_inner())?;

    let wallet = state.wallets.create(user_id, body.into_inner()).await?;

    tracing::info!(
        action = "CreateWallet",
        user_id,
        wallet_id = wallet.id,
        request_uuid = %request_uuid,
        "wallet created"
    );

    Ok(HttpResponse::Created().json(ApiResponse {
        message: Some("Wallet created"),
        data: Some(wallet),
        request_uuid: Some(request_uuid.as_str()),
        ..Default::default()
    }))
}

#[patch("/{wallet_id}")]
async fn wallet_update(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    auth: AuthenticatedUser,
    request_uuid: RequestUuid,
    body: web::Json<WalletUpdateRequest>,
) -> Result<HttpResponse, PortmonetkaError> {
    let (path_user_id, wallet_id) = path.into_inner();
    let user_id = auth.authorize(path_user_id)?;

    let wallet = state.wallets.update(wallet_id, user_id, body.into_inner()).await?;

    tracing::info!(
        action = "UpdateWallet",
        user_id,
        wallet_id = wallet.id,
        request_uuid = %request_uuid,
        "wallet updated"
    );

    Ok(HttpResponse::Ok().json(ApiResponse {
        message: Some("Wallet updated"),
        data: Some(wallet),
        request_uuid: Some(request_uuid.as_str()),
        ..Default::default()
    }))
}

#[delete("/{wallet_id}")]
async fn wallet_delete(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    auth: AuthenticatedUser,
    request_uuid: RequestUuid,
) -> Result<HttpResponse, PortmonetkaError> {
    let (path_user_id, wallet_id) = path.into_inner();
    let user_id = auth.authorize(path_user_id)?;

    state.wallets.delete(wallet_id, user_id).await?;

    tracing::info!(
        action = "DeleteWallet",
        user_id,
        wallet_id,
        request_uuid = %request_uuid,
        "wallet deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(wallet_list)
        .service(wallet_create)
        .service(wallet_update)
        .service(wallet_delete);
}
