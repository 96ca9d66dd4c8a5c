/// Upload grant issuance routes
pub mod uploads;

use aide::axum::{routing::post, ApiRouter};

/// Creates the v1 API router with all v1 handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new().api_route("/uploads", post(uploads::create_upload_grant))
}
