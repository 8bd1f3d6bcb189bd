//! Authentication API client
//!
//! Wraps the `/Authen` endpoints and keeps the shared session in sync with
//! their results.

use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, AppResult, AuthError};
use crate::models::{ApiEnvelope, AuthPayload, LoginRequest, RegisterRequest};
use crate::session::Session;

pub struct AuthClient {
    api: Arc<crate::clients::ApiClient>,
}

impl AuthClient {
    pub fn new(api: Arc<crate::clients::ApiClient>) -> Self {
        Self { api }
    }

    /// Log in with email + password.
    ///
    /// On success the session is installed in the shared handle (and thereby
    /// persisted); the created session is also returned for convenience.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let envelope: ApiEnvelope<AuthPayload> =
            self.api.post_json("Authen/login", &request).await?;
        self.install(envelope)
    }

    /// Register a new account; the backend logs the user straight in.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<Session> {
        let envelope: ApiEnvelope<AuthPayload> =
            self.api.post_json("Authen/register", request).await?;
        self.install(envelope)
    }

    /// Clear the session locally. No backend call: the token simply stops
    /// being sent.
    pub fn logout(&self) {
        self.api.session().clear();
        info!("logged out, session cleared");
    }

    fn install(&self, envelope: ApiEnvelope<AuthPayload>) -> AppResult<Session> {
        let payload = match (envelope.success, envelope.data) {
            (true, Some(payload)) => payload,
            _ => {
                return Err(AppError::Auth(AuthError::LoginFailed {
                    message: envelope.message,
                }))
            }
        };
        let session = Session {
            token: payload.access_token.clone(),
            user: payload.into_user(),
        };
        self.api.session().set(session.clone());
        info!("✓ logged in as {}", session.user.name);
        Ok(session)
    }
}
