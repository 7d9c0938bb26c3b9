//! HTTP Basic gate with exactly one accepted identity.
//!
//! Not a security-grade model: one shared pair, compared as plain strings.

use std::fmt;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Parses an `Authorization: Basic <base64(user:password)>` header value.
    /// The password may itself contain `:`; only the first colon splits.
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(token.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (user, password) = decoded.split_once(':')?;
        Some(Self::new(user, password))
    }

    /// The opaque token a client stores and replays as `Basic <token>`.
    pub fn to_token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.user, self.password))
    }
}

/// Middleware guarding every `/api/*` route.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(Credentials::from_authorization_header);

    match presented {
        Some(creds) if creds == *state.credentials => Ok(next.run(request).await),
        Some(creds) => {
            warn!(user = %creds.user, "Rejected basic-auth credentials");
            Err(AppError::Unauthorized)
        }
        None => Err(AppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trips_through_header() {
        let creds = Credentials::new("reviewer@example.org", "s3cret");
        let header = format!("Basic {}", creds.to_token());
        assert_eq!(Credentials::from_authorization_header(&header), Some(creds));
    }

    #[test]
    fn test_password_with_colon_keeps_remainder() {
        let token = STANDARD.encode("user:pa:ss");
        let creds = Credentials::from_authorization_header(&format!("Basic {token}")).unwrap();
        assert_eq!(creds.user, "user");
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let token = STANDARD.encode("u:p");
        assert!(Credentials::from_authorization_header(&format!("basic {token}")).is_some());
    }

    #[test]
    fn test_rejects_other_schemes_and_garbage() {
        assert!(Credentials::from_authorization_header("Bearer abc").is_none());
        assert!(Credentials::from_authorization_header("Basic !!!notbase64").is_none());
        assert!(Credentials::from_authorization_header("Basic").is_none());
        let no_colon = STANDARD.encode("nocolon");
        assert!(Credentials::from_authorization_header(&format!("Basic {no_colon}")).is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("u", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
