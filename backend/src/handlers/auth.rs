use actix_web::{web, Either, HttpResponse, HttpResponseBuilder};
use shared::{LoginRequest, RegisterRequest};

use crate::config::Config;
use crate::error::AuthError;
use crate::middleware::auth::{token_cookie, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::models::AppState;
use crate::services::session::{self as session_service, SessionGrant};

/// Form posts and JSON bodies are both accepted
type Payload<T> = Either<web::Json<T>, web::Form<T>>;

fn into_request<T>(payload: Payload<T>) -> T {
    match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AuthError::Validation("Email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AuthError::Validation("Email address is invalid".to_string()));
    }
    Ok(email)
}

fn require_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()));
    }
    Ok(())
}

fn session_response(mut builder: HttpResponseBuilder, grant: &SessionGrant, config: &Config) -> HttpResponse {
    builder
        .cookie(token_cookie(ACCESS_COOKIE, &grant.access, config))
        .cookie(token_cookie(REFRESH_COOKIE, &grant.refresh, config))
        .content_type("text/plain; charset=utf-8")
        .body("ok")
}

pub async fn register(
    state: web::Data<AppState>,
    body: Payload<RegisterRequest>,
) -> Result<HttpResponse, AuthError> {
    let request = into_request(body);

    let email = normalize_email(&request.email)?;
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AuthError::Validation("Username is required".to_string()));
    }
    require_password(&request.password)?;

    let grant = session_service::register(
        &state.db,
        &state.config.tokens,
        &email,
        username,
        &request.password,
    )
    .await?;

    Ok(session_response(HttpResponse::Created(), &grant, &state.config))
}

pub async fn login(
    state: web::Data<AppState>,
    body: Payload<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    let request = into_request(body);

    let email = normalize_email(&request.email)?;
    require_password(&request.password)?;

    let grant = session_service::login(&state.db, &state.config.tokens, &email, &request.password).await?;

    Ok(session_response(HttpResponse::Ok(), &grant, &state.config))
}
