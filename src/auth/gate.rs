use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{JwtKeys, UserRole};
use crate::utils::error::AppError;

/// Identity of the caller, inserted by [`require_role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub subject: String,
    pub role: UserRole,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))
    }
}

/// Admits bearer tokens whose role is in `allowed`.
#[derive(Clone)]
pub struct RoleGate {
    keys: Arc<JwtKeys>,
    allowed: Arc<[UserRole]>,
}

impl RoleGate {
    pub fn new(keys: Arc<JwtKeys>, allowed: &[UserRole]) -> Self {
        Self {
            keys,
            allowed: allowed.into(),
        }
    }

    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
    }

    /// 401 for a missing or unverifiable token, 403 for a verified token
    /// whose role is not admitted.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<CurrentUser, AppError> {
        let token = bearer_token(headers)
            .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

        let claims = self.keys.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AppError::AuthError("Could not validate credentials".to_string())
        })?;

        match claims.role.parse::<UserRole>() {
            Ok(role) if self.allows(role) => Ok(CurrentUser {
                subject: claims.sub,
                role,
            }),
            _ => Err(AppError::Forbidden("Operation not permitted".to_string())),
        }
    }
}

/// The auth scheme is matched case-insensitively (RFC 7235).
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(|c: char| c.is_ascii_whitespace())?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token.trim()).filter(|token| !token.is_empty())
}

/// Middleware running the gate before any handler of the router it wraps.
pub async fn require_role(
    State(gate): State<RoleGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = gate.authorize(request.headers())?;
    tracing::debug!(subject = %user.subject, role = %user.role, "Caller admitted");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
