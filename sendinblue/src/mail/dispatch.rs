//! Sends a built payload and classifies the provider's answer.

use super::http::{HttpClient, HttpRequest, API_KEY_HEADER};
use super::payload::Dialect;
use super::MailError;

/// A response with a status of 299 or below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Reject an absent or empty key.
pub fn require_api_key(api_key: Option<&str>) -> Result<&str, MailError> {
    match api_key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(MailError::MissingApiKey),
    }
}

/// POST `payload` to `{base_uri}{D::PATH}`.
///
/// The key is checked before anything is serialized or sent.
pub async fn deliver<D: Dialect>(
    client: &impl HttpClient,
    payload: &D::Payload,
    api_key: Option<&str>,
    base_uri: &str,
) -> Result<DeliveryResponse, MailError> {
    let api_key = require_api_key(api_key)?;

    let request = HttpRequest {
        url: format!("{}{}", base_uri.trim_end_matches('/'), D::PATH),
        headers: vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (API_KEY_HEADER.to_string(), api_key.to_string()),
        ],
        body: serde_json::to_string(payload)?,
    };

    // Kept for the error message; the request itself is moved into the client.
    let sent = request.clone();

    let response = client.post(request).await.inspect_err(|e| {
        tracing::warn!(url = %sent.url, error = %e, "sendinblue request failed");
    })?;

    if response.status > 299 {
        tracing::warn!(status = response.status, url = %sent.url, "sendinblue rejected email");
        return Err(MailError::Api {
            status: response.status,
            response: response.body,
            request: sent.redacted().to_string(),
        });
    }

    Ok(DeliveryResponse {
        status: response.status,
        headers: response.headers,
        body: response.body,
    })
}
