use actix_web::{middleware::from_fn, web, HttpResponse};
use shared::{Product, ProductList, ResourceId};

use crate::middleware::error_request;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .wrap(from_fn(error_request))
            .route("", web::get().to(get_products))
            .route("/{id}", web::get().to(get_product)),
    );
}

async fn get_products() -> HttpResponse {
    let products = (1..=3)
        .map(|id| Product { id, name: format!("Product {}", id) })
        .collect();

    HttpResponse::Ok().json(ProductList { products })
}

async fn get_product(path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(ResourceId { id: path.into_inner() })
}
