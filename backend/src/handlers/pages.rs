//! HTML pages served from `STATIC_FILES_PATH/html`.

use actix_files::NamedFile;
use actix_web::{web, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::models::AppState;

async fn page(config: &Config, name: &str) -> Result<NamedFile> {
    let file_name = format!("{}.html", name);
    let path: PathBuf = [config.static_files_path.as_str(), "html", file_name.as_str()]
        .iter()
        .collect();

    Ok(NamedFile::open_async(path).await?)
}

pub async fn index(state: web::Data<AppState>) -> Result<NamedFile> {
    page(&state.config, "index").await
}

pub async fn login_page(state: web::Data<AppState>) -> Result<NamedFile> {
    page(&state.config, "login").await
}

pub async fn register_page(state: web::Data<AppState>) -> Result<NamedFile> {
    page(&state.config, "register").await
}

/// Only reachable through the session gate
pub async fn dashboard(state: web::Data<AppState>) -> Result<NamedFile> {
    page(&state.config, "dashboard").await
}
