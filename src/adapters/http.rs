use crate::config::ClientConfig;
use crate::domain::model::SubmissionResponse;
use crate::domain::ports::Transport;
use crate::utils::error::{ErganiError, Result, TransportError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;

const AUTHENTICATION_ENDPOINT: &str = "Authentication";
const SUBMIT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// reqwest-backed [`Transport`] that logs in with username and password and
/// keeps the bearer token for later requests.
pub struct HttpTransport {
    config: ClientConfig,
    client: Client,
    token: Mutex<Option<String>>,
}

#[derive(Deserialize)]
struct AuthenticationResponse {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct RawSubmission {
    id: serde_json::Value,
    protocol: serde_json::Value,
    #[serde(rename = "submitDate")]
    submit_date: String,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| ErganiError::Transport(TransportError::Request(e)))?;

        Ok(Self {
            config,
            client,
            token: Mutex::new(None),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn authenticate(&self) -> std::result::Result<String, TransportError> {
        let url = self.url(AUTHENTICATION_ENDPOINT);
        tracing::debug!("🔑 Requesting Ergani access token from {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "Username": self.config.username,
                "Password": self.config.password,
                "UserType": "01",
            }))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = extract_error_message(response).await;
            return Err(TransportError::Authentication {
                status: status.as_u16(),
                message: fallback_message(status, message),
            });
        }

        let body: AuthenticationResponse = response.json().await?;
        body.access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| TransportError::InvalidResponse {
                message: "authentication response has no accessToken".to_string(),
            })
    }

    /// Cached token, logging in first when there is none.
    async fn bearer_token(&self) -> std::result::Result<String, TransportError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.authenticate().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    async fn execute(
        &self,
        endpoint: &str,
        method: Method,
        payload: &serde_json::Value,
        token: &str,
    ) -> std::result::Result<Response, TransportError> {
        let url = self.url(endpoint);
        tracing::debug!("📡 {} {}", method, url);

        let response = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        tracing::debug!("📡 Ergani response status: {}", response.status());
        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        payload: &serde_json::Value,
    ) -> std::result::Result<Vec<SubmissionResponse>, TransportError> {
        let token = self.bearer_token().await?;
        let mut response = self.execute(endpoint, method.clone(), payload, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("🔑 Ergani rejected the cached token, authenticating again");
            self.invalidate_token().await;
            let token = self.bearer_token().await?;
            response = self.execute(endpoint, method, payload, &token).await?;
        }

        handle_response(response).await
    }
}

async fn handle_response(
    response: Response,
) -> std::result::Result<Vec<SubmissionResponse>, TransportError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        let message = extract_error_message(response).await;
        return Err(TransportError::Authentication {
            status: status.as_u16(),
            message,
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(Vec::new());
    }

    if !status.is_success() {
        let message = extract_error_message(response).await;
        return Err(TransportError::Api {
            status: status.as_u16(),
            message: fallback_message(status, message),
        });
    }

    let body = response.text().await?;
    parse_submissions(&body)
}

/// Parses the receipt list Ergani returns for accepted documents.
pub fn parse_submissions(body: &str) -> std::result::Result<Vec<SubmissionResponse>, TransportError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<RawSubmission> =
        serde_json::from_str(body).map_err(|e| TransportError::InvalidResponse {
            message: format!("cannot parse submission list: {}", e),
        })?;

    raw.into_iter()
        .map(|submission| {
            let submission_date =
                NaiveDateTime::parse_from_str(&submission.submit_date, SUBMIT_DATE_FORMAT).map_err(|e| {
                    TransportError::InvalidResponse {
                        message: format!("invalid submitDate '{}': {}", submission.submit_date, e),
                    }
                })?;

            Ok(SubmissionResponse {
                submission_id: value_text(&submission.id),
                protocol: value_text(&submission.protocol),
                submission_date,
            })
        })
        .collect()
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

async fn extract_error_message(response: Response) -> String {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => error_message_from_body(&content_type, &body),
        Err(_) => String::new(),
    }
}

/// Picks the human readable part of an error body.
pub fn error_message_from_body(content_type: &str, body: &str) -> String {
    if content_type.contains("application/json") {
        if let Ok(data) = serde_json::from_str::<serde_json::Value>(body) {
            for key in ["message", "msg", "detail"] {
                if let Some(value) = data.get(key) {
                    return value_text(value);
                }
            }
            return match &data {
                serde_json::Value::Null => String::new(),
                serde_json::Value::Object(map) if map.is_empty() => String::new(),
                serde_json::Value::Array(items) if items.is_empty() => String::new(),
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
        }
    }

    if content_type.contains("text/plain") {
        return body.trim().to_string();
    }

    String::new()
}

fn fallback_message(status: StatusCode, message: String) -> String {
    if !message.is_empty() {
        return message;
    }
    if status.is_server_error() {
        "Service unavailable, please try again later".to_string()
    } else if status == StatusCode::BAD_REQUEST {
        "Please check your inputs and try again".to_string()
    } else {
        message
    }
}
