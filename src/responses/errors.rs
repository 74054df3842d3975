use crate::errors::AppError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, AppError>;

/// Convert an AppError into a proper HTML response
pub fn error_to_response(err: AppError) -> Response {
    let status = err.status_code();
    if status >= 500 {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, status, "Request rejected");
    }

    let body = error_page(status, &err.to_string()).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
