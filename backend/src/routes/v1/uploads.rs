use std::sync::Arc;

use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    types::AppError,
    uploads::{UploadAuthorizer, DEFAULT_CONTENT_TYPE},
};

/// Request body for an upload grant
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadRequest {
    /// MIME type the client intends to upload, e.g. `image/png`.
    /// Defaults to `image/jpeg` when omitted.
    pub content_type: Option<String>,
}

/// Response body carrying an issued upload grant
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Presigned PUT URL the client uploads the original to
    pub upload_url: String,
    /// Object key the original will be stored under
    pub object_key: String,
}

/// Issues a presigned upload URL bound to a freshly derived object key.
///
/// The request body is optional; requests without one are treated as JPEG
/// uploads.
#[instrument(skip(authorizer, payload))]
pub async fn create_upload_grant(
    Extension(authorizer): Extension<Arc<UploadAuthorizer>>,
    payload: Option<Json<UploadRequest>>,
) -> Result<Json<UploadResponse>, AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let content_type = request
        .content_type
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let grant = authorizer.issue(&content_type).await?;

    tracing::debug!("Issued upload grant for {}", grant.object_key);

    Ok(Json(UploadResponse {
        upload_url: grant.upload_url,
        object_key: grant.object_key,
    }))
}
