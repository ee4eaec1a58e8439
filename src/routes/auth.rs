use actix_web::{HttpResponse, Responder, post, web};

use crate::models::config::AppConfig;

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE_NAME: &str = "token";

/// Clear the auth cookie on every configured domain.
#[post("/auth/logout")]
pub async fn logout(server_config: web::Data<AppConfig>) -> impl Responder {
    let mut response = HttpResponse::NoContent();
    for mut cookie in server_config.auth_cookies(AUTH_COOKIE_NAME, "") {
        cookie.make_removal();
        response.cookie(cookie);
    }
    response.finish()
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::{SameSite, time::Duration};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;

    #[actix_web::test]
    async fn logout_clears_cookie_per_domain() {
        let config = AppConfig {
            cookie_domains: vec!["localhost".into(), "todo.example.com".into()],
            secure_cookie: true,
            jwt_expiration_hours: i64::MAX,
            ..AppConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .service(logout),
        )
        .await;

        let req = test::TestRequest::post().uri("/auth/logout").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let cookies: Vec<_> = resp.response().cookies().collect();
        let domains: Vec<_> = cookies.iter().filter_map(|c| c.domain()).collect();
        assert_eq!(domains, vec!["localhost", "todo.example.com"]);
        for cookie in &cookies {
            assert_eq!(cookie.name(), AUTH_COOKIE_NAME);
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::None));
        }
    }
}
