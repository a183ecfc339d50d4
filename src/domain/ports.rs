use crate::domain::model::SubmissionResponse;
use crate::utils::error::TransportError;
use async_trait::async_trait;
use reqwest::Method;

/// Authenticated JSON transport to the Ergani API.
///
/// Implementations own authentication and response parsing. Callers hand
/// over a finished payload and get back the receipts or the failure as is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        payload: &serde_json::Value,
    ) -> Result<Vec<SubmissionResponse>, TransportError>;
}
