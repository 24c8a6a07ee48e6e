use std::time::Duration;

use const_format::concatcp;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{AppError, Result};
use crate::session::Credential;

const API_PREFIX: &str = "/api/v1";

pub const LIST_USERS_PATH: &str = concatcp!(API_PREFIX, "/users/get-users");
pub const CREATE_USER_PATH: &str = concatcp!(API_PREFIX, "/users");
pub const TEAMS_PATH: &str = concatcp!(API_PREFIX, "/teams");
pub const MY_TEAM_PATH: &str = concatcp!(TEAMS_PATH, "/my-team");
pub const LOGIN_PATH: &str = concatcp!(API_PREFIX, "/auth/login");

pub struct ApiClient {
    http: Client,
    base: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// What a non-success response told us about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Structured { status: u16, message: String },
    StatusOnly { status: u16 },
}

impl ServerMessage {
    pub async fn read(response: Response) -> Self {
        let status = response.status().as_u16();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                message: Some(message),
            }) if !message.trim().is_empty() => ServerMessage::Structured { status, message },
            _ => ServerMessage::StatusOnly { status },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ServerMessage::Structured { status, .. } | ServerMessage::StatusOnly { status } => {
                *status
            }
        }
    }

    /// Server-supplied text, or a generic line naming the status code.
    pub fn into_message(self) -> String {
        match self {
            ServerMessage::Structured { message, .. } => message,
            ServerMessage::StatusOnly { status } => format!("server error at status {status}"),
        }
    }
}

impl ApiClient {
    pub fn new(host: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = Url::parse(host).map_err(|_| AppError::InvalidUrl(host.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base,
        })
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> Result<RequestBuilder> {
        let url = self
            .base
            .join(path)
            .map_err(|_| AppError::InvalidUrl(format!("{}{path}", self.base)))?;

        let mut request = self
            .http
            .request(method, url)
            .header("Content-Type", "application/json");
        if let Some(credential) = credential {
            request = request.bearer_auth(credential.secret());
        }
        Ok(request)
    }

    pub async fn get(
        &self,
        path: &str,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        let request = self.request(Method::GET, path, Some(credential))?;
        dispatch("GET", path, request, cancel).await
    }

    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        credential: Option<&Credential>,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        let request = self.request(Method::POST, path, credential)?.json(body);
        dispatch("POST", path, request, cancel).await
    }
}

async fn dispatch(
    method: &str,
    path: &str,
    request: RequestBuilder,
    cancel: &CancellationToken,
) -> Result<Response> {
    tracing::debug!(method, path, "sending request");

    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(method, path, "request cancelled");
            return Err(AppError::Cancelled);
        }
        response = request.send() => response?,
    };

    tracing::debug!(method, path, status = response.status().as_u16(), "received response");
    Ok(response)
}

/// Decode a success body, giving up early if the call is cancelled.
pub async fn read_json<T: DeserializeOwned>(
    response: Response,
    cancel: &CancellationToken,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        body = response.json::<T>() => Ok(body?),
    }
}
