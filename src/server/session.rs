use super::state::ServerState;
use crate::user::auth::AuthTokenValue;
use crate::user::UserRole;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: usize,
    pub user_handle: String,
    pub token: String,
    pub role: UserRole,
}

impl Session {
    pub fn require(&self, role: UserRole) -> Result<(), SessionExtractionError> {
        if self.role.has_role(role) {
            Ok(())
        } else {
            debug!(
                "User {} with role {} lacks role {}",
                self.user_handle,
                self.role.as_str(),
                role.as_str()
            );
            Err(SessionExtractionError::Forbidden)
        }
    }
}

pub const COOKIE_SESSION_TOKEN_KEY: &str = "session_token";
pub const HEADER_SESSION_TOKEN_KEY: &str = "Authorization";

#[derive(Debug, PartialEq, Eq)]
pub enum SessionExtractionError {
    /// No token, or a token that does not belong to anyone.
    Unauthorized,
    /// Valid session whose role is too low.
    Forbidden,
    InternalError,
}

impl IntoResponse for SessionExtractionError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SessionExtractionError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            SessionExtractionError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            SessionExtractionError::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

fn extract_session_token_from_cookies(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(Cookie::value)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn extract_session_token_from_headers(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(HEADER_SESSION_TOKEN_KEY)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .map(|v| v.strip_prefix("Bearer ").map(str::to_string).unwrap_or(v))
}

fn extract_session_from_request_parts(
    parts: &Parts,
    ctx: &ServerState,
) -> Result<Session, SessionExtractionError> {
    let token = extract_session_token_from_cookies(parts)
        .or_else(|| extract_session_token_from_headers(parts))
        .ok_or_else(|| {
            debug!("No token in cookies nor headers.");
            SessionExtractionError::Unauthorized
        })?;

    let user_manager = ctx.user_manager.lock().map_err(|_| {
        error!("User manager lock poisoned");
        SessionExtractionError::InternalError
    })?;
    let auth_token_value = AuthTokenValue(token);
    let auth_token = match user_manager.get_auth_token(&auth_token_value) {
        Ok(Some(token)) => token,
        Ok(None) => {
            debug!("Auth token not found in database");
            return Err(SessionExtractionError::Unauthorized);
        }
        Err(e) => {
            error!("Failed to get auth token from database: {}", e);
            return Err(SessionExtractionError::InternalError);
        }
    };

    if let Err(e) = user_manager.update_auth_token_last_used(&auth_token_value) {
        debug!("Failed to update auth token last_used timestamp: {}", e);
    }

    let resolved = user_manager
        .get_user_handle(auth_token.user_id)
        .and_then(|handle| Ok((handle, user_manager.get_user_role(auth_token.user_id)?)));
    let (handle, role) = match resolved {
        Ok((Some(handle), role)) => (handle, role),
        Ok((None, _)) => return Err(SessionExtractionError::Unauthorized),
        Err(e) => {
            error!(
                "Failed to resolve user {} for session: {}",
                auth_token.user_id, e
            );
            return Err(SessionExtractionError::InternalError);
        }
    };

    Ok(Session {
        user_id: auth_token.user_id,
        user_handle: handle,
        token: auth_token.value.0,
        role,
    })
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = SessionExtractionError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx)
    }
}

impl FromRequestParts<ServerState> for Option<Session> {
    type Rejection = SessionExtractionError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match extract_session_from_request_parts(parts, ctx) {
            Ok(session) => Ok(Some(session)),
            Err(SessionExtractionError::InternalError) => {
                Err(SessionExtractionError::InternalError)
            }
            Err(_) => Ok(None),
        }
    }
}

/// Declares an extractor that only accepts sessions holding at least the
/// given role.
macro_rules! role_session {
    ($name:ident, $role:expr) => {
        #[derive(Debug)]
        pub struct $name(pub Session);

        impl FromRequestParts<ServerState> for $name {
            type Rejection = SessionExtractionError;

            async fn from_request_parts(
                parts: &mut Parts,
                ctx: &ServerState,
            ) -> Result<Self, Self::Rejection> {
                let session = extract_session_from_request_parts(parts, ctx)?;
                session.require($role)?;
                Ok($name(session))
            }
        }
    };
}

role_session!(ViewerSession, UserRole::Viewer);
role_session!(ManagerSession, UserRole::Manager);
role_session!(AdminSession, UserRole::Admin);
