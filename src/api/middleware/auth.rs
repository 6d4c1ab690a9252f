//! Basic authentication middleware for mutating routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use serde_json::json;
use sha2::{Digest, Sha256};

use crate::{error::AppError, state::AppState};

/// The single user/password pair allowed on `/url` routes.
///
/// The password is kept only as a SHA-256 digest; both fields are compared
/// as digests.
#[derive(Clone)]
pub struct BasicCredentials {
    user: String,
    password_digest: [u8; 32],
}

impl BasicCredentials {
    pub fn new(user: impl Into<String>, password: &str) -> Self {
        Self {
            user: user.into(),
            password_digest: digest(password),
        }
    }

    /// Returns `true` if the pair matches the configured credentials.
    pub fn verify(&self, user: &str, password: &str) -> bool {
        let user_ok = digest(user) == digest(&self.user);
        let password_ok = digest(password) == self.password_digest;
        user_ok & password_ok
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Authenticates requests using HTTP basic auth.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(user:password)
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge if
/// the header is missing, malformed or carries the wrong credentials.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/url", post(save_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    if !st
        .credentials
        .verify(&user, password.as_deref().unwrap_or_default())
    {
        tracing::warn!(user, path = %parts.uri.path(), "basic auth rejected");
        return Err(AppError::unauthorized(
            "unauthorized",
            json!({ "reason": "Invalid credentials" }),
        ));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
