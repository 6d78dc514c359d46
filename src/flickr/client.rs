use super::types::{FlickrPhotoset, FlickrUser};
use crate::config::FlickrConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {text}")]
    UnexpectedStatus { status: StatusCode, text: String },

    #[error("Unsuccessful call: {message}")]
    Api { message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for the Flickr REST endpoint.
pub struct FlickrClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl FlickrClient {
    /// Create a client with a 5 second connect timeout and the configured
    /// request timeout.
    pub fn new(config: &FlickrConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Call a REST method and decode its payload.
    ///
    /// # Errors
    /// * If the request can't be sent or the status is not a success.
    /// * If `stat` is anything but `"ok"`.
    /// * If the payload doesn't decode into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("method", method.to_string()));
        query.push(("api_key", self.api_key.clone()));
        query.push(("format", "json".to_string()));
        query.push(("nojsoncallback", "1".to_string()));

        debug!(method, "Calling Flickr");
        let response = self.http.get(&self.endpoint).query(&query).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::UnexpectedStatus { status, text });
        }

        let envelope: Value = serde_json::from_str(&text)?;
        let payload = unwrap_envelope(envelope)?;
        Ok(serde_json::from_value(payload)?)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<FlickrUser, RemoteError> {
        self.call(
            "flickr.people.findByUsername",
            &[("username", username.to_string())],
        )
        .await
    }

    /// Fetch the first page of a photoset, with capture dates.
    pub async fn get_photoset_photos(
        &self,
        user_id: &str,
        photoset_id: &str,
        per_page: Option<u32>,
    ) -> Result<FlickrPhotoset, RemoteError> {
        let mut params = vec![
            ("user_id", user_id.to_string()),
            ("photoset_id", photoset_id.to_string()),
            ("extras", "date_taken".to_string()),
        ];
        if let Some(per_page) = per_page {
            params.push(("per_page", per_page.to_string()));
        }

        self.call("flickr.photosets.getPhotos", &params).await
    }
}

/// Check `stat` and return the payload, the single top-level property that
/// is not part of the status envelope.
pub fn unwrap_envelope(envelope: Value) -> Result<Value, RemoteError> {
    let Value::Object(mut object) = envelope else {
        return Err(RemoteError::MalformedResponse(
            "expected a JSON object".to_string(),
        ));
    };

    match object.get("stat").and_then(Value::as_str) {
        Some("ok") => {}
        _ => {
            let message = object
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message")
                .to_string();
            return Err(RemoteError::Api { message });
        }
    }

    object.remove("stat");
    let key = object
        .keys()
        .next()
        .cloned()
        .ok_or_else(|| RemoteError::MalformedResponse("no payload".to_string()))?;

    object
        .remove(&key)
        .ok_or_else(|| RemoteError::MalformedResponse("no payload".to_string()))
}
