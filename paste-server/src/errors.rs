use actix_web::error::PayloadError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use blob_store::StoreError;
use thiserror::Error;

/// Request-level failures. Messages are deliberately generic; the underlying
/// cause is logged, never sent to the client.
#[derive(Debug, Error)]
pub enum PasteErr {
    #[error("400 Bad Request")]
    BadRequest(#[from] PayloadError),

    #[error("413 Payload Too Large")]
    PayloadTooLarge { limit: usize },

    #[error("404 Page Not Found")]
    NotFound,

    #[error("500 Internal Server Error")]
    Store(#[from] StoreError),
}

impl ResponseError for PasteErr {
    fn status_code(&self) -> StatusCode {
        match self {
            PasteErr::BadRequest(_) => StatusCode::BAD_REQUEST,
            PasteErr::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            PasteErr::NotFound => StatusCode::NOT_FOUND,
            PasteErr::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}
