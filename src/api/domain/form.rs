use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;

/// Fields are optional so the handler, not the extractor, decides what a
/// missing `to` or `file` means.
#[derive(MultipartForm)]
pub struct UploadForm {
    pub to: Option<Text<String>>,
    pub file: Option<TempFile>,
}

/// `to` may also arrive in the query string; a form field of the same name
/// takes precedence.
#[derive(Deserialize)]
pub struct DestinationQuery {
    pub to: Option<String>,
}
