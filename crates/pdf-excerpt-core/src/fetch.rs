//! Downloading the remote document.
//!
//! A single GET per request: no retries, and no timeout unless one is
//! configured.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("Failed to fetch PDF: {status} {status_text}")]
    Status { status: u16, status_text: String },
    /// DNS, connect, timeout, invalid URL or body read failure.
    #[error("Failed to fetch PDF: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

/// Raw bytes of a downloaded document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub bytes: Vec<u8>,
}

impl FetchedDocument {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetcherOptions {
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Fetcher {
    pub fn new(options: &FetcherOptions) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(ref ua) = options.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        tracing::info!(url, "fetching PDF");
        let resp = self.client.get(url).send().await?;
        check_status(&resp)?;

        let document = FetchedDocument {
            bytes: resp.bytes().await?.to_vec(),
        };
        tracing::info!(url, bytes = document.size(), "PDF fetched");
        Ok(document)
    }
}

/// Map a non-success response to [`FetchError::Status`].
pub fn check_status(resp: &reqwest::Response) -> Result<(), FetchError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_on_200() {
        let http_resp = http::Response::builder().status(200).body("").unwrap();
        let resp = reqwest::Response::from(http_resp);
        assert!(check_status(&resp).is_ok());
    }

    #[test]
    fn not_found_carries_status_and_text() {
        let http_resp = http::Response::builder().status(404).body("").unwrap();
        let resp = reqwest::Response::from(http_resp);
        match check_status(&resp).unwrap_err() {
            FetchError::Status {
                status,
                status_text,
            } => {
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn server_error_message() {
        let http_resp = http::Response::builder().status(503).body("").unwrap();
        let resp = reqwest::Response::from(http_resp);
        let err = check_status(&resp).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch PDF: 503 Service Unavailable"
        );
    }

    #[tokio::test]
    async fn invalid_url_is_transport_error() {
        let fetcher = Fetcher::default();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn builds_with_timeout_and_user_agent() {
        let options = FetcherOptions {
            timeout: Some(Duration::from_secs(5)),
            user_agent: Some("pdf-excerpt-test".into()),
        };
        assert!(Fetcher::new(&options).is_ok());
    }
}
