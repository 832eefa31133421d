//! Authenticated session
//!
//! The session is an explicit value built from the login response and
//! passed to whatever needs it. Nothing here touches global state or a
//! shared client's default headers.

use crate::error::{GigDeskError, Result};
use crate::types::{RecordId, Role};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Bearer token issued by `POST /auth/login`
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(GigDeskError::Validation("Auth token is empty".to_string()));
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Signed-in user as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: RecordId,
    #[serde(alias = "fullName", alias = "username")]
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Authenticated session
///
/// Only built from a login response; the token is never serialized back out.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: AuthToken,
    user: SessionUser,
}

#[derive(Deserialize)]
struct LoginBody {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
    user: SessionUser,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Direct(LoginBody),
    Wrapped { data: LoginBody },
}

impl Session {
    pub fn new(token: AuthToken, user: SessionUser) -> Self {
        Self { token, user }
    }

    /// Parse the body of a successful login response
    pub fn from_login_response(body: &str) -> Result<Self> {
        let response: LoginResponse = serde_json::from_str(body)
            .map_err(|e| GigDeskError::Serde(e).with_context("Unrecognized login response"))?;
        let body = match response {
            LoginResponse::Direct(body) | LoginResponse::Wrapped { data: body } => body,
        };

        let session = Self::new(AuthToken::new(body.token)?, body.user);
        debug!("Session for {} ({})", session.user.email, session.user.role);
        Ok(session)
    }

    /// Load a saved login response
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GigDeskError::FileNotFound(path.to_path_buf()));
        }
        let body = fs::read_to_string(path)?;
        Self::from_login_response(&body)
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    /// Value for the `Authorization` header
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token.expose())
    }

    /// Fail unless the signed-in user has the given role
    pub fn require_role(&self, role: Role) -> Result<()> {
        if self.user.role != role {
            return Err(GigDeskError::Unauthorized(format!(
                "{} requires the {} role, signed in as {}",
                self.user.email, role, self.user.role
            )));
        }
        Ok(())
    }
}
