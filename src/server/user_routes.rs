//! Login, logout, the current session and user administration.

use std::sync::MutexGuard;

use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use super::session::{AdminSession, Session, COOKIE_SESSION_TOKEN_KEY};
use super::state::{GuardedUserManager, ServerState};
use crate::access::{navigation_for, NavItem};
use crate::user::auth::AuthTokenValue;
use crate::user::{Permission, UserManager, UserOverview, UserRole};

fn lock_users(user_manager: &GuardedUserManager) -> ApiResult<MutexGuard<'_, UserManager>> {
    user_manager
        .lock()
        .map_err(|_| ApiError::Internal(anyhow!("User manager lock poisoned")))
}

#[derive(Deserialize, Debug)]
struct LoginBody {
    pub user_handle: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginSuccessResponse {
    token: String,
}

async fn login(
    State(user_manager): State<GuardedUserManager>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Response> {
    debug!("login() called for {}", body.user_handle);
    let locked_manager = lock_users(&user_manager)?;
    let Some(credentials) = locked_manager.authenticate(&body.user_handle, &body.password)? else {
        return Ok(StatusCode::FORBIDDEN.into_response());
    };

    let auth_token = locked_manager.generate_auth_token(&credentials)?;
    info!("{} logged in", body.user_handle);
    let cookie = Cookie::build((COOKIE_SESSION_TOKEN_KEY, auth_token.value.0.clone()))
        .path("/")
        .http_only(true)
        .build();

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(LoginSuccessResponse {
            token: auth_token.value.0,
        }),
    )
        .into_response())
}

async fn logout(
    State(user_manager): State<GuardedUserManager>,
    session: Session,
) -> ApiResult<Response> {
    let locked_manager = lock_users(&user_manager)?;
    if let Err(err) =
        locked_manager.delete_auth_token(session.user_id, &AuthTokenValue(session.token))
    {
        debug!("Logout failed: {}", err);
        return Ok(StatusCode::BAD_REQUEST.into_response());
    }

    let cookie = Cookie::build((COOKIE_SESSION_TOKEN_KEY, ""))
        .path("/")
        .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1))
        .same_site(SameSite::Lax)
        .build();
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie.to_string())]).into_response())
}

#[derive(Serialize)]
struct SessionInfo {
    user_handle: String,
    role: UserRole,
    permissions: &'static [Permission],
    navigation: Vec<NavItem>,
}

async fn get_session(session: Session) -> Json<SessionInfo> {
    Json(SessionInfo {
        navigation: navigation_for(session.role),
        permissions: session.role.permissions(),
        role: session.role,
        user_handle: session.user_handle,
    })
}

async fn list_users(
    _session: AdminSession,
    State(user_manager): State<GuardedUserManager>,
) -> ApiResult<Json<Vec<UserOverview>>> {
    Ok(Json(lock_users(&user_manager)?.list_users()?))
}

#[derive(Deserialize, Debug)]
struct CreateUserBody {
    pub handle: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

async fn create_user(
    AdminSession(session): AdminSession,
    State(user_manager): State<GuardedUserManager>,
    Json(body): Json<CreateUserBody>,
) -> ApiResult<(StatusCode, Json<UserOverview>)> {
    if body.handle.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Handle and password are required".to_string(),
        ));
    }

    let locked_manager = lock_users(&user_manager)?;
    if locked_manager.get_user_id(&body.handle)?.is_some() {
        return Err(ApiError::BadRequest(format!(
            "User {} already exists",
            body.handle
        )));
    }
    locked_manager.add_user_with_login(&body.handle, body.password, body.role)?;
    info!(
        "{} created user {} as {}",
        session.user_handle,
        body.handle,
        body.role.as_str()
    );

    Ok((
        StatusCode::CREATED,
        Json(UserOverview {
            handle: body.handle,
            role: body.role,
            has_password: true,
        }),
    ))
}

fn require_user(manager: &UserManager, handle: &str) -> ApiResult<usize> {
    manager
        .get_user_id(handle)?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", handle)))
}

#[derive(Deserialize, Debug)]
struct SetRoleBody {
    pub role: UserRole,
}

async fn set_user_role(
    AdminSession(session): AdminSession,
    State(user_manager): State<GuardedUserManager>,
    Path(handle): Path<String>,
    Json(body): Json<SetRoleBody>,
) -> ApiResult<StatusCode> {
    let locked_manager = lock_users(&user_manager)?;
    require_user(&locked_manager, &handle)?;
    locked_manager.set_user_role(&handle, body.role)?;
    debug!("{} changed role of {}", session.user_handle, handle);
    Ok(StatusCode::OK)
}

async fn delete_user_login(
    AdminSession(session): AdminSession,
    State(user_manager): State<GuardedUserManager>,
    Path(handle): Path<String>,
) -> ApiResult<StatusCode> {
    let locked_manager = lock_users(&user_manager)?;
    require_user(&locked_manager, &handle)?;
    locked_manager.delete_password_credentials(&handle)?;
    info!("{} removed the login of {}", session.user_handle, handle);
    Ok(StatusCode::NO_CONTENT)
}

pub fn auth_routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/session", get(get_session))
}

pub fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{handle}/role", put(set_user_role))
        .route("/users/{handle}/login", delete(delete_user_login))
}
