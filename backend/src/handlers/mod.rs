use actix_web::{middleware::from_fn, web};

use crate::middleware::{log_request, require_session};

pub mod auth;
pub mod pages;
pub mod products;
pub mod session;
pub mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .service(
            web::resource("/login")
                .route(web::get().to(pages::login_page))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(pages::register_page))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/dashboard")
                .wrap(from_fn(require_session))
                .route(web::get().to(pages::dashboard)),
        )
        .service(
            // Outermost wrap runs first: the session gate, then the logger
            web::scope("/api")
                .wrap(from_fn(log_request))
                .wrap(from_fn(require_session))
                .configure(session::configure)
                .configure(users::configure)
                .configure(products::configure),
        );
}
