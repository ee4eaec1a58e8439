use actix_web::cookie::{Cookie, SameSite, time::Duration};

use crate::models::config::AppConfig;

const MAX_EXPIRATION_HOURS: i64 = i64::MAX / 3600;

impl AppConfig {
    /// Token lifetime. Negative hour counts are treated as zero and huge ones
    /// saturate instead of overflowing.
    pub fn jwt_expiration(&self) -> Duration {
        Duration::hours(self.jwt_expiration_hours.clamp(0, MAX_EXPIRATION_HOURS))
    }

    /// Build the auth cookie once per configured domain.
    ///
    /// Secure cookies are sent cross-site (`SameSite=None`), plain ones stay `Lax`.
    pub fn auth_cookies(&self, name: &str, value: &str) -> Vec<Cookie<'static>> {
        let same_site = if self.secure_cookie {
            SameSite::None
        } else {
            SameSite::Lax
        };

        self.cookie_domains
            .iter()
            .map(|domain| {
                Cookie::build(name.to_string(), value.to_string())
                    .domain(domain.clone())
                    .path("/")
                    .http_only(true)
                    .secure(self.secure_cookie)
                    .same_site(same_site)
                    .max_age(self.jwt_expiration())
                    .finish()
            })
            .collect()
    }
}
