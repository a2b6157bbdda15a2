/**
 * Image Upload Route
 *
 * `PUT /post-image` stores the image for a post before the post itself is
 * created or updated through GraphQL.
 *
 * # Request
 *
 * `multipart/form-data` with:
 * - `image` - PNG or JPEG file
 * - `oldPath` (optional) - previously returned `filePath` to delete
 *
 * # Responses
 *
 * - `201 { "message": "File stored.", "filePath": "images/<uuid><name>" }`
 * - `200 { "message": "No file provided!" }` when no accepted file arrived
 * - `401` envelope when the request is not authenticated
 */

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::error::ApiError;
use crate::backend::middleware::RequestContext;
use crate::backend::server::state::AppState;
use crate::backend::upload::read_upload;

pub const POST_IMAGE_PATH: &str = "/post-image";

/// Text field naming the image being replaced
pub const OLD_PATH_FIELD: &str = "oldPath";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

fn no_file() -> Response {
    let body = ImageResponse {
        message: "No file provided!",
        file_path: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Store an uploaded post image
///
/// Authentication is checked before the body is touched, so nothing is
/// written for anonymous callers. A body that is not multipart at all is
/// treated like a form without a file.
pub async fn put_post_image(
    State(state): State<AppState>,
    context: RequestContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let user_id = context.require_user()?;

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!("Upload without multipart body: {}", rejection);
            return Ok(no_file());
        }
    };

    let images = &state.services.images;
    let form = read_upload(images, multipart).await?;

    let Some(file) = form.file.as_ref() else {
        return Ok(no_file());
    };

    if let Some(old_path) = form.field(OLD_PATH_FIELD) {
        images.clear(old_path).await;
    }

    tracing::info!(
        user_id = %user_id,
        path = %file.storage_path,
        mime = %file.mime_type,
        "Post image stored"
    );

    let body = ImageResponse {
        message: "File stored.",
        file_path: Some(file.storage_path.clone()),
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}
