use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;

use config::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("Starting server at {}:{}", config.host, config.port);
    log::info!("Serving static files from: {}", config.static_files_path);

    let pool = db::connect(&config.database_url).await.map_err(|e| {
        log::error!("Failed to open database: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    log::info!("Database migrations completed");

    let app_state = web::Data::new(models::AppState {
        db: pool.clone(),
        config: config.clone(),
    });

    let static_files_path = config.static_files_path.clone();

    let result = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(handlers::configure_routes)
            .service(Files::new("/", static_files_path.as_str()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    pool.close().await;
    log::info!("Database pool closed, server stopped");

    result
}
