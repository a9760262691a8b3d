//! Bridge to the hosted image service.
//!
//! Uploads are signed server-side and forwarded with `reqwest`; the caller
//! gets back the stable public URL and the host's opaque identifier. The
//! bridge never touches the database - recording the URL on an entity is the
//! upload handler's job, and only after the upload succeeded.

use base64::Engine;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Image host credentials are not configured")]
    MissingCredentials,

    #[error("{0}")]
    InvalidPayload(String),

    #[error("Image host returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    #[serde(rename = "secure_url")]
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: String,
}

pub struct MediaClient {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl MediaClient {
    pub fn from_config() -> Result<Self, MediaError> {
        let media = &config::config().media;
        if media.cloud_name.is_empty() || media.api_key.is_empty() || media.api_secret.is_empty() {
            return Err(MediaError::MissingCredentials);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            cloud_name: media.cloud_name.clone(),
            api_key: media.api_key.clone(),
            api_secret: media.api_secret.clone(),
            base_url: media.base_url.clone(),
        })
    }

    /// Upload a base64-encoded image (bare or `data:` URI) into a folder.
    pub async fn upload(&self, file: &str, folder: &str) -> Result<UploadedImage, MediaError> {
        let payload = validate_base64_payload(file)?;

        let timestamp = Utc::now().timestamp().to_string();
        let signed = vec![
            ("folder".to_string(), folder.to_string()),
            ("timestamp".to_string(), timestamp.clone()),
        ];
        let signature = sign_params(&signed, &self.api_secret);

        let url = format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name);
        let form = [
            ("file", payload.as_str()),
            ("folder", folder),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self.http.post(&url).form(&form).send().await?;
        Self::parse_response(response).await
    }

    /// Delete a previously uploaded image by its opaque identifier.
    pub async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signed = vec![
            ("public_id".to_string(), public_id.to_string()),
            ("timestamp".to_string(), timestamp.clone()),
        ];
        let signature = sign_params(&signed, &self.api_secret);

        let url = format!("{}/v1_1/{}/image/destroy", self.base_url, self.cloud_name);
        let form = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self.http.post(&url).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(MediaError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn parse_response(response: reqwest::Response) -> Result<UploadedImage, MediaError> {
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(MediaError::Upstream {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<UploadedImage>().await?)
    }

    async fn error_message(response: reqwest::Response) -> String {
        match response.json::<UpstreamErrorBody>().await {
            Ok(body) => body
                .error
                .map(|detail| detail.message)
                .unwrap_or_else(|| "unknown error".to_string()),
            Err(_) => "unknown error".to_string(),
        }
    }
}

/// Reject empty or undecodable payloads before any upstream call is made.
/// Returns the payload in the form the host accepts (a `data:` URI).
fn validate_base64_payload(file: &str) -> Result<String, MediaError> {
    if file.trim().is_empty() {
        return Err(MediaError::InvalidPayload("No file provided".to_string()));
    }

    let encoded = match file.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => file,
    };

    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| MediaError::InvalidPayload("File is not valid base64 data".to_string()))?;

    if file.starts_with("data:") {
        Ok(file.to_string())
    } else {
        Ok(format!("data:image/png;base64,{}", encoded.trim()))
    }
}

/// Signature over the sorted request params, hex-encoded SHA-256 of
/// `k=v&k=v...` with the API secret appended.
fn sign_params(params: &[(String, String)], api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(signature_payload(params));
    hasher.update(api_secret);
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

fn signature_payload(params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_payload_sorts_params() {
        let params = vec![
            ("timestamp".to_string(), "1700000000".to_string()),
            ("folder".to_string(), "architecture-firm".to_string()),
        ];
        assert_eq!(
            signature_payload(&params),
            "folder=architecture-firm&timestamp=1700000000"
        );
    }

    #[test]
    fn signatures_are_hex_and_secret_dependent() {
        let params = vec![("timestamp".to_string(), "123".to_string())];
        let a = sign_params(&params, "secret-a");
        let b = sign_params(&params, "secret-b");

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
        // Deterministic for the same inputs
        assert_eq!(a, sign_params(&params, "secret-a"));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(
            validate_base64_payload(""),
            Err(MediaError::InvalidPayload(_))
        ));
        assert!(matches!(
            validate_base64_payload("   "),
            Err(MediaError::InvalidPayload(_))
        ));
    }

    #[test]
    fn garbage_base64_is_rejected() {
        assert!(matches!(
            validate_base64_payload("data:image/png;base64,!!not-base64!!"),
            Err(MediaError::InvalidPayload(_))
        ));
    }

    #[test]
    fn bare_base64_gains_a_data_uri_prefix() {
        // "aGVsbG8=" is valid base64
        let payload = validate_base64_payload("aGVsbG8=").unwrap();
        assert_eq!(payload, "data:image/png;base64,aGVsbG8=");

        let uri = validate_base64_payload("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(uri, "data:image/jpeg;base64,aGVsbG8=");
    }
}
