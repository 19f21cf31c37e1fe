use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Runs the request inside a log scope naming its path and id, and echoes the
/// id in the `x-request-id` response header.
pub async fn request_scope(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().simple().to_string();
    let label = format!("RequestPath:{} RequestId:{request_id}", request.uri().path());

    let mut response = rnf_log::scopes::in_scope(label, next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
