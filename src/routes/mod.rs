use actix_web::web;

pub mod auth;
pub mod health;

/// Register every route of the API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health).service(auth::logout);
}
