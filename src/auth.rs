//! Login and account registration. Neither call needs a credential.

use std::sync::OnceLock;

use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::client::{self, ApiClient, ServerMessage, CREATE_USER_PATH, LOGIN_PATH};
use crate::error::{AppError, Result};
use crate::responses::{LoginRequest, LoginResponse, RegisterRequest};
use crate::session::{Credential, Session};
use crate::types::User;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"))
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<()> {
    require("email", email)?;
    if !email_pattern().is_match(email.trim()) {
        return Err(AppError::Validation(format!("'{email}' is not a valid email")));
    }
    Ok(())
}

/// Exchange email and password for a token and persist it.
pub async fn login(
    client: &ApiClient,
    session: &Session,
    email: &str,
    password: &str,
    cancel: &CancellationToken,
) -> Result<Credential> {
    require_email(email)?;
    require("password", password)?;

    let body = LoginRequest {
        email: email.trim(),
        password,
    };
    let response = client.post(LOGIN_PATH, None, &body, cancel).await?;

    if !response.status().is_success() {
        let failure = ServerMessage::read(response).await;
        tracing::warn!(status = failure.status(), "login rejected");
        let message = match failure {
            ServerMessage::Structured { message, .. } => message,
            ServerMessage::StatusOnly { .. } => "Failed to log in".to_string(),
        };
        return Err(AppError::Auth(message));
    }

    let LoginResponse { access_token } = client::read_json(response, cancel).await?;
    let credential = Credential::new(access_token);
    session.store(&credential)?;
    tracing::info!(email = email.trim(), "logged in");
    Ok(credential)
}

pub struct Registration {
    pub name: String,
    pub identity_document: String,
    pub email: String,
    pub password: String,
    pub role_id: u32,
    pub course_id: u32,
}

impl Registration {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("identity document", &self.identity_document)?;
        require_email(&self.email)?;
        require("password", &self.password)
    }
}

pub async fn register(
    client: &ApiClient,
    registration: &Registration,
    cancel: &CancellationToken,
) -> Result<User> {
    registration.validate()?;

    let body = RegisterRequest {
        name: registration.name.trim(),
        identity_document: registration.identity_document.trim(),
        email: registration.email.trim(),
        password: &registration.password,
        role_id: registration.role_id,
        course_id: registration.course_id,
    };
    let response = client.post(CREATE_USER_PATH, None, &body, cancel).await?;

    if !response.status().is_success() {
        let failure = ServerMessage::read(response).await;
        return Err(AppError::Server(failure.into_message()));
    }

    client::read_json(response, cancel).await
}
