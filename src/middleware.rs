use actix_cors::Cors;
use actix_web::http::{Method, Uri, header};

use crate::models::config::AppConfig;

const CORS_MAX_AGE_SECS: usize = 3600;

/// CORS policy built from `ALLOWED_ORIGINS`.
///
/// A `*` entry opens the API to every origin; credentials are then not
/// allowed. Entries that do not parse as a URI are logged and skipped.
pub fn cors_from_config(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(CORS_MAX_AGE_SECS);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .filter(|origin| match origin.parse::<Uri>() {
            Ok(_) => true,
            Err(err) => {
                log::error!("Ignoring ALLOWED_ORIGINS entry {:?}: {}", origin, err);
                false
            }
        })
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
        .supports_credentials()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};

    use super::*;
    use crate::routes;

    fn preflight(origin: &str) -> test::TestRequest {
        test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/health")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
    }

    #[actix_web::test]
    async fn configured_origin_passes_preflight() {
        let config = AppConfig {
            allowed_origins: vec![
                "http://localhost:5173".into(),
                "https://todo.example.com".into(),
            ],
            ..AppConfig::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(cors_from_config(&config))
                .app_data(web::Data::new(config.clone()))
                .configure(routes::configure),
        )
        .await;

        let req = preflight("https://todo.example.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://todo.example.com"
        );
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn unknown_origin_is_rejected() {
        let config = AppConfig::default();
        let app = test::init_service(
            App::new()
                .wrap(cors_from_config(&config))
                .app_data(web::Data::new(config.clone()))
                .configure(routes::configure),
        )
        .await;

        let req = preflight("https://evil.example").to_request();
        let outcome = test::try_call_service(&app, req).await;
        let rejected = match outcome {
            Ok(resp) => resp
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none(),
            Err(_) => true,
        };
        assert!(rejected);
    }

    #[actix_web::test]
    async fn malformed_origin_is_skipped() {
        let config = AppConfig {
            allowed_origins: vec!["https://todo .example".into(), "https://ok.example".into()],
            ..AppConfig::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(cors_from_config(&config))
                .app_data(web::Data::new(config.clone()))
                .configure(routes::configure),
        )
        .await;

        let req = preflight("https://ok.example").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://ok.example"
        );
    }

    #[actix_web::test]
    async fn wildcard_allows_any_origin() {
        let config = AppConfig {
            allowed_origins: vec!["*".into()],
            ..AppConfig::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(cors_from_config(&config))
                .app_data(web::Data::new(config.clone()))
                .configure(routes::configure),
        )
        .await;

        let req = preflight("https://anywhere.example").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .is_none()
        );
    }
}
