use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::models::config::AppConfig;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    cache_enabled: bool,
}

#[get("/health")]
pub async fn health(server_config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        cache_enabled: server_config.cache_address().is_some(),
    })
}
