use actix_web::{middleware::from_fn, web, HttpResponse};
use shared::{ResourceId, UserList, UserSummary};

use crate::middleware::warn_request;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(from_fn(warn_request))
            .route("", web::get().to(get_users))
            .route("/{id}", web::get().to(get_user)),
    );
}

async fn get_users() -> HttpResponse {
    let users = ["John Doe", "Jane Doe", "Josh Doe"]
        .iter()
        .zip(1..)
        .map(|(name, id)| UserSummary { id, name: name.to_string() })
        .collect();

    HttpResponse::Ok().json(UserList { users })
}

async fn get_user(path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ResourceId { id: path.into_inner() })
}
