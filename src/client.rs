use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, StatusCode};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Base URL of the hosted completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/";
/// Environment variable consulted when no key is passed explicitly.
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const COMPLETIONS_PATH: &str = "chat/completions";

/// Anything that can turn a chat-completions request into a response.
///
/// The chat session talks to the network only through this trait, so tests and
/// alternative transports can stand in for [`ChatClient`].
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one request and wait for the whole reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] carrying the raw body when the endpoint answers
    /// with anything other than 200, and a transport or serialization error
    /// when the exchange itself fails.
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse>;
}

#[async_trait::async_trait]
impl<B: CompletionBackend + ?Sized> CompletionBackend for Arc<B> {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        (**self).complete(request).await
    }
}

/// Client for an OpenAI-style chat-completions endpoint.
#[derive(Clone)]
pub struct ChatClient {
    api_key: String,
    client: ReqwestClient,
    endpoint: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Create a new client against the default endpoint.
    ///
    /// The API key can be provided directly or read from the
    /// `DEEPSEEK_API_KEY` environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var(API_KEY_ENV).map_err(|_| {
                Error::authentication(format!(
                    "API key not provided and {API_KEY_ENV} environment variable not set"
                ))
            })?,
        };
        if api_key.trim().is_empty() {
            return Err(Error::authentication("API key is empty"));
        }
        if HeaderValue::from_str(&format!("Bearer {api_key}")).is_err() {
            return Err(Error::validation(
                "API key contains characters that cannot be sent in a header",
                Some("api_key".to_string()),
            ));
        }

        let base_url = base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let endpoint = endpoint_url(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            endpoint,
            timeout,
            logger: None,
        })
    }

    /// Attaches a logger that sees every request and its outcome.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|e| {
            Error::validation(format!("invalid API key: {e}"), Some("api_key".to_string()))
        })?;
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(e.to_string(), Some(self.timeout.as_secs_f64()))
        } else if e.is_connect() {
            Error::connection(e.to_string(), Some(Box::new(e)))
        } else {
            Error::http_client(e.to_string(), Some(Box::new(e)))
        }
    }

    async fn send(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.default_headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.map_err(|e| {
                Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                )
            })?;
            return Err(Error::api(status.as_u16(), body));
        }

        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_slice::<ChatCompletionResponse>(&bytes).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        if let Some(logger) = &self.logger {
            logger.log_request(request);
        }
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.send(request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        match &result {
            Ok(response) => {
                if let Some(logger) = &self.logger {
                    logger.log_response(response);
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(err);
                }
            }
        }
        result
    }
}

/// Resolves the completions URL against a base URL.
///
/// A base without a trailing slash is treated as a directory, so
/// `https://host/v1` and `https://host/v1/` resolve to the same endpoint.
fn endpoint_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if base.cannot_be_a_base() {
        return Err(Error::url(
            format!("{base_url} cannot be used as a base URL"),
            None,
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(COMPLETIONS_PATH)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ChatClient::new(Some("test-key".to_string())).unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = ChatClient::with_options(
            Some("test-key".to_string()),
            Some("http://127.0.0.1:8080/api/v2".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:8080/api/v2/chat/completions"
        );
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = ChatClient::new(Some("   ".to_string())).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let err = ChatClient::new(Some("abc\ndef".to_string())).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err =
            ChatClient::with_options(Some("k".to_string()), Some("nope".to_string()), None)
                .unwrap_err();
        assert!(matches!(err, Error::Url { .. }));

        let err = ChatClient::with_options(
            Some("k".to_string()),
            Some("mailto:someone@example.com".to_string()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn headers_carry_bearer_credential() {
        let client = ChatClient::new(Some("secret".to_string())).unwrap();
        let headers = client.default_headers().unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer secret");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn debug_hides_credential() {
        let client = ChatClient::new(Some("secret".to_string())).unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("chat/completions"));
    }
}
