use std::sync::Arc;
use actix_web::http::header::ContentType;
use actix_web::web::{BytesMut, Data};
use actix_web::{get, post, web, HttpResponse};
use blob_store::{derive_key, BlobStore};
use futures_util::StreamExt;
use serde::Deserialize;
use crate::errors::PasteErr;
use crate::params::{OversizePolicy, UploadLimits};

pub struct PasteState {
    pub(crate) store: Arc<dyn BlobStore>,
    pub(crate) limits: UploadLimits,
}

impl PasteState {
    pub fn new(store: Arc<dyn BlobStore>, limits: UploadLimits) -> Self {
        Self { store, limits }
    }
}

#[derive(Deserialize)]
struct FetchParams {
    #[serde(default)]
    id: Option<String>,
}

/// Reads the request body up to `limits.max_size` bytes, applying the
/// oversize policy to anything past that.
async fn read_bounded(mut payload: web::Payload, limits: &UploadLimits) -> Result<BytesMut, PasteErr> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        let room = limits.max_size - body.len();
        if chunk.len() > room {
            match limits.oversize {
                OversizePolicy::Truncate => {
                    body.extend_from_slice(&chunk[..room]);
                    break;
                }
                OversizePolicy::Reject => {
                    return Err(PasteErr::PayloadTooLarge { limit: limits.max_size });
                }
            }
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[post("/upload")]
async fn upload_paste(
    payload: web::Payload,
    shared_state: Data<PasteState>,
) -> Result<HttpResponse, PasteErr> {
    let data = read_bounded(payload, &shared_state.limits).await.map_err(|e| {
        match &e {
            PasteErr::PayloadTooLarge { limit } => tracing::debug!("rejecting upload over {} bytes", limit),
            other => tracing::debug!("failed to read upload body: {}", other),
        }
        e
    })?;

    let key = derive_key(&data);
    if let Err(e) = shared_state.store.put(&key, &data).await {
        tracing::error!("failed to store paste {}: {}", key, e);
        return Err(PasteErr::Store(e));
    }

    tracing::debug!("stored paste {} ({} bytes)", key, data.len());
    Ok(HttpResponse::Ok().content_type(ContentType::plaintext()).body(key))
}

#[get("/fetch")]
async fn fetch_paste(
    params: Option<web::Query<FetchParams>>,
    shared_state: Data<PasteState>,
) -> Result<HttpResponse, PasteErr> {
    let key = params
        .and_then(|q| q.into_inner().id)
        .filter(|id| !id.is_empty())
        .ok_or(PasteErr::NotFound)?;

    match shared_state.store.get(&key).await {
        Ok(data) => Ok(HttpResponse::Ok().content_type(ContentType::octet_stream()).body(data)),
        Err(e) if e.is_not_found() => {
            tracing::debug!("paste {} not found", key);
            Err(PasteErr::NotFound)
        }
        Err(e) => {
            // Clients only ever see 404 here.
            tracing::warn!("failed to read paste {}: {}", key, e);
            Err(PasteErr::NotFound)
        }
    }
}
