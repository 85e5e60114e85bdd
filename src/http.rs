//! HTTP implementation of [`ApiClient`].

use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest, Method};
use crate::config::ClientConfig;

const USER_AGENT: &str = concat!("dnp-client/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed API client.
pub struct HttpApiClient {
    http_client: reqwest::Client,
    config: ClientConfig,
    token: RwLock<Option<SecretString>>,
}

impl HttpApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
            token: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Interprets a response body.
///
/// Error statuses that still carry an envelope are handed back as-is so the
/// server's message reaches the user.
fn read_body(status: u16, body: &str) -> Result<Value, ApiError> {
    let success = (200..300).contains(&status);
    if success && body.trim().is_empty() {
        return Ok(serde_json::json!({ "success": true }));
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) if success => Ok(value),
        Ok(value) if value.get("success").is_some() => Ok(value),
        Ok(_) => Err(ApiError::Status {
            status,
            body: body.to_string(),
        }),
        Err(e) if success => Err(ApiError::Decode(e.to_string())),
        Err(_) => Err(ApiError::Status {
            status,
            body: body.to_string(),
        }),
    }
}

impl ApiClient for HttpApiClient {
    async fn request(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.config.url(&request.path);
        let mut builder = self.http_client.request(to_reqwest(request.method), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.authenticated {
            let token = self.bearer().ok_or(ApiError::Unauthenticated)?;
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(method = request.method.as_str(), url = %url, "sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_body(status, &body)
    }

    fn set_token(&self, token: Option<SecretString>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
