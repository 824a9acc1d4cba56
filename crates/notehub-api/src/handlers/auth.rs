//! Auth handlers: registration, credential login, GitHub OAuth and the
//! current session.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Cookie, HeaderMapExt};

use notehub_core::error::AppError;
use notehub_entity::user::User;
use notehub_service::user::identity::{LoginRequest, SessionGrant};

use crate::dto::request::{CallbackQuery, LoginBody, RegisterBody};
use crate::dto::response::{ApiResponse, Created, SessionResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// Cookie holding the nonce the OAuth `state` is bound to.
const OAUTH_NONCE_COOKIE: &str = "notehub_oauth_nonce";

fn nonce_cookie(state: &AppState, value: &str, max_age_seconds: u64) -> String {
    let mut cookie = format!(
        "{OAUTH_NONCE_COOKIE}={value}; Path=/api/auth/github; Max-Age={max_age_seconds}; HttpOnly; SameSite=Lax"
    );
    if state.config.github.redirect_url.starts_with("https://") {
        cookie.push_str("; Secure");
    }
    cookie
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterBody>,
) -> ApiResult<Created<User>> {
    let user = state.identity_service.register(body.into()).await?;
    Ok(Created(user))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginBody>,
) -> ApiResult<Json<ApiResponse<SessionGrant>>> {
    let grant = state.identity_service.login(body.into()).await?;
    Ok(Json(ApiResponse::ok(grant)))
}

/// GET /api/auth/github
///
/// Also sets the nonce cookie the callback checks the `state` against.
pub async fn github_authorize(State(state): State<AppState>) -> ApiResult<Response> {
    let redirect = state.identity_service.github_authorize()?;
    let max_age = state.config.auth.oauth_state_ttl_minutes * 60;
    let cookie = nonce_cookie(&state, &redirect.nonce, max_age);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::ok(redirect)),
    )
        .into_response())
}

/// GET /api/auth/github/callback?code=...&state=...
pub async fn github_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedQuery(query): ValidatedQuery<CallbackQuery>,
) -> ApiResult<Response> {
    if let Some(error) = query.error {
        return Err(
            AppError::unauthorized(format!("GitHub sign-in was not completed: {error}")).into(),
        );
    }

    let (code, oauth_state) = match (query.code, query.state) {
        (Some(code), Some(oauth_state)) if !code.is_empty() && !oauth_state.is_empty() => {
            (code, oauth_state)
        }
        _ => return Err(AppError::validation("Missing code or state").into()),
    };

    let nonce = headers
        .typed_get::<Cookie>()
        .and_then(|cookies| cookies.get(OAUTH_NONCE_COOKIE).map(str::to_string))
        .ok_or_else(|| AppError::unauthorized("GitHub sign-in was not started in this browser"))?;

    let grant: SessionGrant = state
        .identity_service
        .login(LoginRequest::GitHub {
            code,
            state: oauth_state,
            nonce,
        })
        .await?;

    Ok((
        [(header::SET_COOKIE, nonce_cookie(&state, "", 0))],
        Json(ApiResponse::ok(grant)),
    )
        .into_response())
}

/// GET /api/auth/session
pub async fn session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<SessionResponse>>> {
    let user = state.user_service.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok(SessionResponse {
        user,
        github_connected: auth.github_token.is_some(),
    })))
}
