use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse};

static INDEX_PAGE: &[u8] = include_bytes!("../../assets/index.html");
static CLIENT_WASM: &[u8] = include_bytes!("../../assets/pastesec.wasm");

const APP_TYPE_WASM: &str = "application/wasm";

#[get("/wasm")]
async fn client_wasm() -> HttpResponse {
    HttpResponse::Ok().content_type(APP_TYPE_WASM).body(CLIENT_WASM)
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(INDEX_PAGE)
}
