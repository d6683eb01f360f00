pub mod blog;

use std::{collections::BTreeMap, fmt, future::Future};

use log::{debug, log_enabled, trace};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::{
    model::{EditDraft, LoginForm, Post, PostDraft, PostId, RegisterForm, User, UserId},
    validate::FormErrors,
};

pub use blog::BlogClient;

/// Everything the views and flows need from the backend.
pub trait BlogApi {
    fn register(&self, form: &RegisterForm) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn login(&self, form: &LoginForm) -> impl Future<Output = Result<User, ApiError>> + Send;
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn create_post(
        &self,
        draft: &PostDraft,
        owner: &UserId,
    ) -> impl Future<Output = Result<Post, ApiError>> + Send;
    fn get_posts(&self) -> impl Future<Output = Result<Vec<Post>, ApiError>> + Send;
    fn get_posts_by_user(
        &self,
        owner: &UserId,
    ) -> impl Future<Output = Result<Vec<Post>, ApiError>> + Send;
    fn delete_post(&self, id: &PostId) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn update_post(
        &self,
        id: &PostId,
        draft: &EditDraft,
    ) -> impl Future<Output = Result<Post, ApiError>> + Send;
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("server rejected the request ({status}){}", rejection_suffix(.message))]
    Rejected {
        status: StatusCode,
        message: Option<ServerMessage>,
    },
    #[error("unexpected response ({status}): {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no data")]
    MissingData,
}

impl ApiError {
    /// Per-field messages sent back by the server, if any.
    pub fn field_errors(&self) -> Option<FormErrors> {
        match self {
            Self::Rejected {
                message: Some(ServerMessage::Fields(fields)),
                ..
            } => Some(FormErrors::from_server(fields)),
            _ => None,
        }
    }
}

fn rejection_suffix(message: &Option<ServerMessage>) -> String {
    message
        .as_ref()
        .map(|message| format!(": {}", message))
        .unwrap_or_default()
}

/// The `message` member of a response.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ServerMessage {
    Text(String),
    Fields(BTreeMap<String, String>),
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Fields(fields) => {
                let mut first = true;
                for (field, message) in fields {
                    if !first {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}: {}", field, message)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub data: Option<T>,
    pub message: Option<ServerMessage>,
}

#[derive(Deserialize, Debug, Clone)]
struct ApiRejection {
    #[serde(default)]
    status: Option<bool>,
    #[serde(default)]
    message: Option<ServerMessage>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Send the request and unwrap the `{status, data, message}` envelope.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await?;

        debug!("{} {}", status, url);
        if log_enabled!(log::Level::Trace) {
            match serde_json::from_slice::<Value>(&body) {
                Ok(value) => trace!("{}", serde_json::to_string_pretty(&value)?),
                Err(_) => trace!("{}", String::from_utf8_lossy(&body)),
            }
        }

        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(envelope) if status.is_success() && envelope.status => Ok(envelope),
            Ok(envelope) => Err(ApiError::Rejected {
                status,
                message: envelope.message,
            }),
            Err(error) => match serde_json::from_slice::<ApiRejection>(&body) {
                // a failure envelope whose data does not match T
                Ok(rejection) if !status.is_success() || rejection.status == Some(false) => {
                    Err(ApiError::Rejected {
                        status,
                        message: rejection.message,
                    })
                }
                _ if !status.is_success() => Err(ApiError::Status {
                    status,
                    body: String::from_utf8_lossy(&body).to_string(),
                }),
                _ => Err(ApiError::Decode(error)),
            },
        }
    }
}
