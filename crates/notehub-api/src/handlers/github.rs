//! GitHub handlers: repositories and sync.

use axum::Json;
use axum::extract::State;

use notehub_service::github::{RepositorySummary, SyncOutcome};

use crate::dto::request::{CreateRepositoryBody, SyncBody};
use crate::dto::response::{ApiResponse, Created};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/github/repos
pub async fn list_repositories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<RepositorySummary>>>> {
    let repos = state.repository_service.list_repositories(&auth).await?;
    Ok(Json(ApiResponse::ok(repos)))
}

/// POST /api/github/repos
pub async fn create_repository(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateRepositoryBody>,
) -> ApiResult<Created<RepositorySummary>> {
    let repo = state
        .repository_service
        .create_repository(&auth, body.into())
        .await?;
    Ok(Created(repo))
}

/// POST /api/github/sync
pub async fn sync(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<SyncBody>,
) -> ApiResult<Json<ApiResponse<SyncOutcome>>> {
    let outcome = state
        .sync_service
        .sync_all(&auth, &body.repository_owner, &body.repository_name)
        .await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
