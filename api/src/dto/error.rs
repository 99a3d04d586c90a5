use actix_web::http::StatusCode;
use actix_web::HttpResponse;
pub use td_shared::{error_codes, ErrorResponse};

/// Builds actix responses from the shared error body
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
