mod docs;
mod health;
/// Version 1 API routes
pub mod v1;

use aide::axum::{routing::get, ApiRouter};

use crate::types::Environment;

/// Creates the router with all handler routes.
///
/// The docs routes are mounted only in environments that show API docs, so
/// production serves neither the schema nor the docs page.
pub fn handler(environment: &Environment) -> ApiRouter {
    let router = ApiRouter::new()
        .api_route("/health", get(health::handler))
        .nest("/v1", v1::handler());

    if environment.show_api_docs() {
        router.merge(docs::handler())
    } else {
        router
    }
}
