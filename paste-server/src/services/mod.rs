use actix_web::web;

pub mod asset_service;
pub mod paste_service;

pub use paste_service::PasteState;

/// Registers every route. Shared state is attached by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(paste_service::upload_paste)
        .service(paste_service::fetch_paste)
        .service(asset_service::client_wasm)
        .service(asset_service::index);
}
