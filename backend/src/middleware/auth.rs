use actix_web::{
    body::{EitherBody, MessageBody},
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, HttpMessage,
};

use crate::config::Config;
use crate::models::AppState;
use crate::services::auth::IssuedToken;
use crate::services::session as session_service;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Build the HTTP-only cookie that carries a token, living as long as the token.
pub fn token_cookie(name: &'static str, token: &IssuedToken, config: &Config) -> Cookie<'static> {
    Cookie::build(name, token.value.clone())
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(token.ttl.num_seconds()))
        .finish()
}

/// Gate a route behind the cookie session.
///
/// On success the session claims are placed in the request extensions, and a
/// reissued access token (if any) is added to the handler's response.
pub async fn require_session(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, Error> {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        log::error!("Application state missing for {}", req.path());
        return Ok(req
            .error_response(actix_web::error::ErrorInternalServerError("Internal server error"))
            .map_into_right_body());
    };

    let access_token = req.cookie(ACCESS_COOKIE).map(|c| c.value().to_string());
    let refresh_token = req.cookie(REFRESH_COOKIE).map(|c| c.value().to_string());

    let authorization = match session_service::authorize(
        &state.db,
        &state.config.tokens,
        access_token.as_deref(),
        refresh_token.as_deref(),
    )
    .await
    {
        Ok(authorization) => authorization,
        Err(e) => return Ok(req.error_response(e).map_into_right_body()),
    };

    req.extensions_mut().insert(authorization.claims);

    let mut res = next.call(req).await?;

    if let Some(ref token) = authorization.reissued {
        res.response_mut()
            .add_cookie(&token_cookie(ACCESS_COOKIE, token, &state.config))?;
    }

    Ok(res.map_into_left_body())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenSettings;
    use crate::services::auth::{issue_token, TokenKind};
    use chrono::Duration;

    fn config(secure_cookies: bool) -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "sqlite::memory:".to_string(),
            tokens: TokenSettings {
                secret: "test-secret".to_string(),
                access_ttl: Duration::seconds(20),
                refresh_ttl: Duration::days(7),
            },
            secure_cookies,
            static_files_path: "./public".to_string(),
        }
    }

    #[test]
    fn test_token_cookie_attributes() {
        let config = config(true);
        let token = issue_token("a@x.com", "alice", TokenKind::Access, &config.tokens).unwrap();

        let cookie = token_cookie(ACCESS_COOKIE, &token, &config);

        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), token.value);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(20)));
    }

    #[test]
    fn test_refresh_cookie_lives_seven_days() {
        let config = config(false);
        let token = issue_token("a@x.com", "alice", TokenKind::Refresh, &config.tokens).unwrap();

        let cookie = token_cookie(REFRESH_COOKIE, &token, &config);

        assert_eq!(cookie.max_age(), Some(CookieDuration::days(7)));
        assert_eq!(cookie.secure(), Some(false));
    }
}
