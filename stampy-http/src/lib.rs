//! HTTP retrieval of the aisafety.info question export.
//!
//! A single-endpoint client with basic auth, bounded retries, and safe
//! structured logging: the password is never logged, only the fact that
//! basic auth was attached. Retries cover 429 and 5xx responses (honouring
//! `Retry-After`) plus transport failures, with exponential backoff.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), stampy_http::HttpError> {
//! let client = stampy_http::QuestionsClient::new("https://aisafety.info")?;
//! let doc = client
//!     .fetch_all(stampy_http::StatusFilter::Live, "hunter2")
//!     .await?;
//! # let _ = doc; Ok(()) }
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tokio::time::sleep;
use url::Url;

const QUESTIONS_PATH: &str = "questions/allQuestions";
const BASIC_AUTH_USER: &str = "stampy";

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {body_snippet}")]
    Api {
        status: StatusCode,
        body_snippet: String,
    },
}

/// Which question statuses the endpoint should include in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    Live,
    InProgress,
    #[default]
    All,
}

impl StatusFilter {
    /// The value sent as the `questions` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            StatusFilter::Live => "live",
            StatusFilter::InProgress => "inProgress",
            StatusFilter::All => "all",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

#[derive(Debug, Error)]
#[error("expected one of live|inProgress|all, got {0:?}")]
pub struct ParseStatusFilterError(String);

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(StatusFilter::Live),
            "inProgress" => Ok(StatusFilter::InProgress),
            "all" => Ok(StatusFilter::All),
            other => Err(ParseStatusFilterError(other.to_string())),
        }
    }
}

/// Client for the `questions/allQuestions` export endpoint.
#[derive(Clone)]
pub struct QuestionsClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl QuestionsClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use stampy_http::{HttpError, QuestionsClient};
    /// use std::time::Duration;
    ///
    /// let client = QuestionsClient::new("https://aisafety.info")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(30));
    /// assert_eq!(client.max_retries, 2);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(30),
            max_retries: 2,
        })
    }

    /// Override the default request timeout.
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the retry budget for 429/5xx and transport failures.
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// Fetch the full question export as one JSON document.
    ///
    /// The authentication is known to be weak (shared basic-auth password);
    /// the caller is responsible for sourcing the credential.
    pub async fn fetch_all(&self, status: StatusFilter, password: &str) -> Result<Value, HttpError> {
        let url = self
            .base
            .join(QUESTIONS_PATH)
            .map_err(|e| HttpError::Url(e.to_string()))?;
        let query = [
            ("dataType", "singleFileJson"),
            ("questions", status.as_query_value()),
        ];

        let mut attempt = 0usize;
        loop {
            tracing::debug!(
                attempt = attempt + 1,
                max_retries = self.max_retries,
                host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
                %status,
                timeout_ms = self.default_timeout.as_millis() as u64,
                auth_kind = "basic",
                "questions.request.start"
            );

            let sent = self
                .inner
                .get(url.clone())
                .query(&query)
                .basic_auth(BASIC_AUTH_USER, Some(password))
                .timeout(self.default_timeout)
                .send()
                .await;

            let resp = match sent {
                Ok(resp) => resp,
                Err(err) => {
                    if attempt < self.max_retries {
                        attempt += 1;
                        let delay = backoff(attempt);
                        tracing::warn!(
                            attempt,
                            backoff_ms = delay.as_millis() as u64,
                            error = %err,
                            "questions.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(err.to_string()));
                }
            };

            let http_status = resp.status();
            let headers = resp.headers().clone();
            let bytes = resp
                .bytes()
                .await
                .map_err(|e| HttpError::Network(e.to_string()))?;

            tracing::debug!(
                status = %http_status,
                body_len = bytes.len(),
                "questions.response"
            );

            if http_status.is_success() {
                return serde_json::from_slice::<Value>(&bytes).map_err(|e| {
                    tracing::warn!(
                        serde_err = %e,
                        body_snippet = %snip_body(&bytes),
                        "questions.decode_error"
                    );
                    HttpError::Decode(e.to_string(), snip_body(&bytes))
                });
            }

            let retryable =
                http_status == StatusCode::TOO_MANY_REQUESTS || http_status.is_server_error();
            if retryable && attempt < self.max_retries {
                attempt += 1;
                let delay = retry_after_delay_secs(&headers)
                    .map(Duration::from_secs)
                    .unwrap_or_else(|| backoff(attempt));
                tracing::warn!(
                    status = %http_status,
                    attempt,
                    backoff_ms = delay.as_millis() as u64,
                    "questions.retrying"
                );
                sleep(delay).await;
                continue;
            }

            let body_snippet = snip_body(&bytes);
            tracing::warn!(status = %http_status, body_snippet = %body_snippet, "questions.error");
            return Err(HttpError::Api {
                status: http_status,
                body_snippet,
            });
        }
    }
}

fn backoff(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt - 1)))
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        // Back off to a char boundary; byte 500 may fall mid-character.
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_round_trips_through_query_values() {
        for filter in [StatusFilter::Live, StatusFilter::InProgress, StatusFilter::All] {
            assert_eq!(filter.as_query_value().parse::<StatusFilter>().unwrap(), filter);
        }
        assert!("LIVE".parse::<StatusFilter>().is_err());
        assert!("".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn default_filter_is_all() {
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }

    #[test]
    fn body_snippets_are_bounded() {
        let long = vec![b'x'; 2000];
        let snip = snip_body(&long);
        assert!(snip.len() <= 503);
        assert!(snip.ends_with("..."));
        assert_eq!(snip_body(b"short"), "short");
    }

    #[test]
    fn body_snippet_truncation_lands_on_char_boundaries() {
        // Byte 500 falls inside the first multibyte character.
        let mut body = vec![b'x'; 499];
        body.extend("ééé".as_bytes());
        let snip = snip_body(&body);
        assert!(snip.ends_with("..."));
        assert_eq!(snip.len(), 502); // cut back to byte 499 + "..."
    }

    #[test]
    fn backoff_grows_exponentially() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(3), Duration::from_millis(800));
    }
}
