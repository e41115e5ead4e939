use std::fmt;

use shared::{
    domain::Route,
    protocol::{ApiResponse, LoginRequest, LoginResponse},
};
use tracing::{info, warn};

use crate::{api::CatalogApi, error::RequestError, session::AuthSession};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MISSING_CREDENTIALS: &str = "Email and password are required";
pub const PENDING_MESSAGE: &str = "Sending request...";

/// Sign-in form. Its two inputs are read as-is; there are no per-field rules
/// beyond both being present.
#[derive(Default)]
pub struct LoginForm {
    email: String,
    password: String,
    is_submitting: bool,
    error: Option<String>,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_submitting", &self.is_submitting)
            .field("error", &self.error)
            .finish()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Text shown in place of the submit button while a request is out.
    pub fn pending_message(&self) -> Option<&'static str> {
        self.is_submitting.then_some(PENDING_MESSAGE)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a sign-in. Returns the request to send, or `None` when a
    /// request is already out or a credential is blank (with
    /// [`Self::error`] set). The form reports [`PENDING_MESSAGE`] until
    /// [`Self::finish_submit`] runs.
    pub fn begin_submit(&mut self) -> Option<LoginRequest> {
        if self.is_submitting {
            return None;
        }
        if self.email.is_empty() || self.password.is_empty() {
            self.error = Some(MISSING_CREDENTIALS.to_string());
            return None;
        }

        self.error = None;
        self.is_submitting = true;
        Some(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Applies the login answer. Stores the token in `session` and returns
    /// the route to show next, or `None` with [`Self::error`] set.
    pub async fn finish_submit(
        &mut self,
        result: Result<ApiResponse<LoginResponse>, RequestError>,
        session: &AuthSession,
    ) -> Option<Route> {
        self.is_submitting = false;

        match result {
            Ok(response) if response.is_success() => {
                session.login(response.data.token).await;
                info!("auth: signed in email={}", self.email);
                Some(Route::Dashboard)
            }
            Ok(response) => {
                warn!("auth: login answered status={}", response.status);
                self.error = Some(INVALID_CREDENTIALS.to_string());
                None
            }
            Err(err) => {
                warn!("auth: login failed email={} error={err}", self.email);
                let message = if err.is_unauthorized() {
                    err.server_message().unwrap_or(INVALID_CREDENTIALS)
                } else {
                    INVALID_CREDENTIALS
                };
                self.error = Some(message.to_string());
                None
            }
        }
    }

    /// Runs [`Self::begin_submit`], the request, then [`Self::finish_submit`].
    pub async fn submit(&mut self, api: &dyn CatalogApi, session: &AuthSession) -> Option<Route> {
        let request = self.begin_submit()?;
        let result = api.login(&request.email, &request.password).await;
        self.finish_submit(result, session).await
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
