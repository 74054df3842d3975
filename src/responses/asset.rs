use crate::errors::AppError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const MAIN_CSS: &str = include_str!("../../static/main.css");
const INSPECTIONS_JS: &str = include_str!("../../static/inspections.js");

/// Serves a file from `static/`. The files are compiled in so the front end
/// works without network access or a particular working directory.
pub fn static_asset(name: &str) -> ResultResp {
    let (body, content_type) = match name {
        "main.css" => (MAIN_CSS, mime::TEXT_CSS_UTF_8.as_ref()),
        "inspections.js" => (INSPECTIONS_JS, mime::APPLICATION_JAVASCRIPT_UTF_8.as_ref()),
        _ => return Err(AppError::NotFound(format!("/static/{name}"))),
    };

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", "max-age=3600")
        .body(Body::from(body.to_owned()))
        .map_err(|_| AppError::InternalError)
}
