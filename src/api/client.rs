use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, warn};
use url::Url;

use crate::api::Operation;
use crate::api::error::ApiError;
use crate::api::models::{MessageBody, UserRecord, UsernameBody};
use crate::config::Config;

/// A request that did not succeed, reduced to the text the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type Outcome<T> = Result<T, Failure>;

/// The user resource as seen by the panels. Every call settles into an
/// [`Outcome`]; errors never escape as anything else.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Resolves to the server's `message` on success.
    async fn create_user(&self, record: &UserRecord) -> Outcome<String>;

    async fn get_user(&self, username: &str) -> Outcome<UserRecord>;

    async fn update_user(&self, username: &str, new_password: &str) -> Outcome<String>;

    async fn delete_user(&self, username: &str) -> Outcome<String>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(http, &config.api_base_url))
    }

    pub fn with_client(http: Client, base_url: &Url) -> Self {
        let endpoint = format!("{}/user", base_url.as_str().trim_end_matches('/'));
        Self { http, endpoint }
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are optional and may not even be JSON.
        let message = response
            .json::<MessageBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(ApiError::Status { status, message })
    }

    async fn send_for_record(request: RequestBuilder) -> Result<UserRecord, ApiError> {
        Ok(Self::send(request).await?.json().await?)
    }

    /// Any 2xx is a success. The body only contributes the text, so an empty
    /// or non-JSON body leaves the message empty.
    async fn send_for_message(request: RequestBuilder) -> Result<String, ApiError> {
        let response = Self::send(request).await?;
        let message = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<MessageBody>(&bytes)
                .ok()
                .and_then(|body| body.message),
            Err(err) => {
                debug!(error = %err, "could not read success body");
                None
            }
        };
        Ok(message.unwrap_or_default())
    }
}

/// Maps an error to user-facing text. Only delete surfaces what the server said.
fn fail(operation: Operation, err: ApiError) -> Failure {
    warn!(%operation, error = %err, "user request failed");
    let message = match operation {
        Operation::Delete => err
            .server_message()
            .unwrap_or(operation.failure_message())
            .to_string(),
        _ => operation.failure_message().to_string(),
    };
    Failure { message }
}

#[async_trait]
impl UserApi for ApiClient {
    async fn create_user(&self, record: &UserRecord) -> Outcome<String> {
        debug!(username = %record.username, "POST {}", self.endpoint);
        Self::send_for_message(self.http.post(&self.endpoint).json(record))
            .await
            .map_err(|err| fail(Operation::Create, err))
    }

    async fn get_user(&self, username: &str) -> Outcome<UserRecord> {
        debug!(%username, "GET {}", self.endpoint);
        let request = self
            .http
            .get(&self.endpoint)
            .query(&[("Username", username)]);

        Self::send_for_record(request)
            .await
            .map_err(|err| fail(Operation::Read, err))
    }

    async fn update_user(&self, username: &str, new_password: &str) -> Outcome<String> {
        debug!(%username, "PUT {}", self.endpoint);
        let record = UserRecord::new(username, new_password);
        Self::send_for_message(self.http.put(&self.endpoint).json(&record))
            .await
            .map_err(|err| fail(Operation::Update, err))
    }

    async fn delete_user(&self, username: &str) -> Outcome<String> {
        debug!(%username, "DELETE {}", self.endpoint);
        let body = UsernameBody { username };
        Self::send_for_message(self.http.delete(&self.endpoint).json(&body))
            .await
            .map_err(|err| fail(Operation::Delete, err))
    }
}
