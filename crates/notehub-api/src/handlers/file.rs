//! File CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use notehub_entity::file::File;

use crate::dto::request::{CreateFileBody, UpdateFileBody};
use crate::dto::response::{ApiResponse, Created, DeletedResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdQuery, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// GET /api/files, or GET /api/files?id=... for a single file
pub async fn get_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<Response> {
    match query.optional()? {
        Some(id) => {
            let file = state.file_service.get_file(&auth, id).await?;
            Ok(Json(ApiResponse::ok(file)).into_response())
        }
        None => {
            let files = state.file_service.list_files(&auth).await?;
            Ok(Json(ApiResponse::ok(files)).into_response())
        }
    }
}

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateFileBody>,
) -> ApiResult<Created<File>> {
    let file = state.file_service.create_file(&auth, body.into()).await?;
    Ok(Created(file))
}

/// PUT /api/files
pub async fn update_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<UpdateFileBody>,
) -> ApiResult<Json<ApiResponse<File>>> {
    let (id, req) = body.into_parts();
    let file = state.file_service.update_file(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files?id=...
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    let id = query.required()?;
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { id })))
}
