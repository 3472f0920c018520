use crate::api::domain::form::{DestinationQuery, UploadForm};
use crate::storage::writer;
use actix_multipart::form::{MultipartForm, MultipartFormConfig, text::Text, text::TextConfig};
use actix_web::{HttpRequest, HttpResponse, Responder, web};

pub const READY_BODY: &str = "I'm ready for that, you know.";

/// In-memory ceiling for non-file fields. File parts spill to temp files and
/// are not bounded by it.
pub const MEMORY_LIMIT: usize = 10 << 20;

pub fn form_config() -> MultipartFormConfig {
    MultipartFormConfig::default()
        .memory_limit(MEMORY_LIMIT)
        .total_limit(usize::MAX)
}

/// `to` is read as a value whatever content type its part declares.
pub fn text_config() -> TextConfig {
    TextConfig::default().validate_content_type(false)
}

pub async fn ready() -> impl Responder {
    HttpResponse::Ok().body(READY_BODY)
}

fn query_destination(query: &str) -> Option<String> {
    web::Query::<DestinationQuery>::from_query(query)
        .ok()
        .and_then(|q| q.into_inner().to)
}

pub async fn receive(
    req: HttpRequest,
    form: Result<MultipartForm<UploadForm>, actix_web::Error>,
) -> impl Responder {
    let UploadForm { to, file } = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            log::error!("parse form failed: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    let to = match to {
        Some(to) => to.into_inner(),
        None => query_destination(req.query_string()).unwrap_or_default(),
    };

    match web::block(move || writer::store(&to, file)).await {
        Ok(Ok((dest, written))) => {
            log::debug!("{} saved. ({written} bytes)", dest.display());
            HttpResponse::Ok().body("1")
        }
        Ok(Err(e)) => {
            log::error!("{e}");
            HttpResponse::InternalServerError().finish()
        }
        Err(e) => {
            log::error!("blocking pool error: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
