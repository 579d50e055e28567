use actix_web::{web, HttpResponse};
use shared::SessionInfo;

use crate::services::auth::Claims;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(get_current_session));
}

/// Identity of the session that passed the gate
async fn get_current_session(claims: web::ReqData<Claims>) -> HttpResponse {
    let claims = claims.into_inner();
    HttpResponse::Ok().json(SessionInfo {
        email: claims.email,
        username: claims.username,
        expires_at: claims.exp,
    })
}
