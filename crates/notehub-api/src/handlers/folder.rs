//! Folder CRUD handlers.

use axum::Json;
use axum::extract::State;

use notehub_entity::folder::Folder;

use crate::dto::request::{CreateFolderBody, RenameFolderBody};
use crate::dto::response::{ApiResponse, Created, FolderDeletedResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, IdQuery, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let folders = state.folder_service.list_folders(&auth).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateFolderBody>,
) -> ApiResult<Created<Folder>> {
    let folder = state
        .folder_service
        .create_folder(&auth, body.into())
        .await?;
    Ok(Created(folder))
}

/// PUT /api/folders
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<RenameFolderBody>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state
        .folder_service
        .rename_folder(&auth, body.id, &body.name)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders?id=...
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> ApiResult<Json<ApiResponse<FolderDeletedResponse>>> {
    let id = query.required()?;
    let files_removed = state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(FolderDeletedResponse { id, files_removed })))
}
