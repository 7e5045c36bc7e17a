mod wallet;

use actix_web::{HttpResponse, get, web};
use serde_json::json;

#[get("/health")]
pub async fn health_get() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health_get);
    cfg.service(web::scope("/users/{user_id}/wallets").configure(wallet::config));
}
