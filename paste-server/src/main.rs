mod errors;
mod params;
mod services;

use std::io;
use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use blob_store::local_store::LocalBlobStore;
use blob_store::memory_store::MemoryBlobStore;
use blob_store::s3_store::S3BlobStore;
use blob_store::BlobStores;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use crate::params::{Args, StoreKind};
use crate::services::PasteState;

/// Builds the configured backend. Called once; the result is shared by every worker.
async fn open_store(args: &Args) -> io::Result<BlobStores> {
    let container = args.container();
    Ok(match args.store {
        StoreKind::S3 => BlobStores::S3(S3BlobStore::connect(container, &args.s3_options()).await),
        StoreKind::Local => BlobStores::Local(Arc::new(LocalBlobStore::open(&args.data_dir).await?)),
        StoreKind::Memory => BlobStores::Memory(Arc::new(MemoryBlobStore::new())),
    })
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let stores = open_store(&args).await?;
    tracing::info!(
        "storing pastes in {}/{} via {} backend",
        args.namespace, args.bucket, stores.name()
    );

    let state = web::Data::new(PasteState::new(stores.into_shared(), args.upload_limits()));

    tracing::info!("Server listening on {}", args.http_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(services::configure)
    })
        .bind(args.http_addr.clone())?
        .run()
        .await
}
