use std::time::Duration;

use reqwest::multipart;
use reqwest::Client as HttpClient;
use serde_json::Value;
use thiserror::Error;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum PlantNetError {
    /// Upstream answered with a non-2xx status.
    #[error("Error from PlantNet API: {status} - {body}")]
    Upstream { status: u16, body: String },
    /// No usable response: connect/DNS/timeout failures and body decode errors.
    /// The request URL (which carries the api-key) is stripped from the message.
    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for PlantNetError {
    fn from(e: reqwest::Error) -> Self {
        PlantNetError::Transport(e.without_url())
    }
}

/// An image as received from the inbound multipart request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Client for the PlantNet identification endpoint. Cheap to clone; shares
/// the underlying connection pool.
#[derive(Clone)]
pub struct PlantNetClient {
    http_client: HttpClient,
    api_key: String,
    endpoint_url: String,
}

impl PlantNetClient {
    pub fn new(api_key: String, endpoint_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            endpoint_url,
        }
    }

    /// Forwards one image plus location to PlantNet and returns the upstream
    /// JSON body on success.
    pub async fn identify(
        &self,
        image: UploadedImage,
        latitude: &str,
        longitude: &str,
    ) -> Result<Value, PlantNetError> {
        let image_part = multipart::Part::bytes(image.bytes)
            .file_name(image.filename)
            .mime_str(&image.content_type)?;

        // PlantNet expects the key in the URL and everything else in the form.
        let form = multipart::Form::new()
            .part("images", image_part)
            .text("include-related-images", "true")
            .text("no-reject", "false")
            .text("lang", "en")
            .text("latitude", latitude.to_string())
            .text("longitude", longitude.to_string());

        let response = self
            .http_client
            .post(&self.endpoint_url)
            .query(&[("api-key", &self.api_key)])
            .timeout(UPSTREAM_TIMEOUT)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(PlantNetError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await?;
        Ok(json)
    }
}
