//! Thin wrapper around `reqwest::Client` exposing the bookstore CRUD
//! surface. Every call issues exactly one request with JSON content-type
//! and accept headers, records the request/response pair through the
//! configured [`Recorder`], and returns the raw [`Response`] — a non-2xx
//! status is information for the caller, not a client error.

use reqwest::{
    header::{HeaderMap, ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use std::sync::Arc;
use tracing::*;

use crate::{
    config::ApiConfig,
    logger,
    model::{Author, Book},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure issuing the request.
    #[error("HttpError: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to serialize or deserialize a JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LogRequest {
    pub url: reqwest::Url,
    pub method: Method,
    pub headers: HeaderMap,
}

/// Response half of a [`CallLog`]. `status` is `None` when the request
/// never produced a response (transport failure).
#[derive(Debug, Clone, Default)]
pub struct LogResponse {
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CallLog {
    pub request: LogRequest,
    pub response: LogResponse,
}

/// Observability hook attached to every outgoing call. Invoked once per
/// call with the request/response pair, regardless of the outcome.
pub trait Recorder: Send + Sync {
    fn record(&self, log: &CallLog);
}

pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn record(&self, _log: &CallLog) {}
}

/// Writes a one-line call summary through the harness logger, so recorded
/// calls end up in the console report alongside the test banners.
pub struct ConsoleRecorder;

impl Recorder for ConsoleRecorder {
    fn record(&self, log: &CallLog) {
        let status = log
            .response
            .status
            .map(|status| status.as_u16().to_string())
            .unwrap_or_else(|| "transport error".to_string());
        logger::log(format!(
            " => {} {} [{status}]",
            log.request.method, log.request.url
        ));
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    text: String,
}

impl Response {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.text)?)
    }

    async fn from(res: reqwest::Response) -> Response {
        Response {
            status: res.status(),
            headers: res.headers().clone(),
            text: res.text().await.unwrap_or_default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn fake(status: StatusCode, text: impl Into<String>) -> Response {
        Response {
            status,
            headers: HeaderMap::new(),
            text: text.into(),
        }
    }
}

/// The bookstore service client. Construct it from an [`ApiConfig`]; the
/// default recorder writes call summaries to the console report.
#[derive(Clone)]
pub struct BookStoreClient {
    config: ApiConfig,
    inner: reqwest::Client,
    recorder: Arc<dyn Recorder>,
}

impl BookStoreClient {
    pub fn new(config: ApiConfig) -> BookStoreClient {
        BookStoreClient::with_recorder(config, Arc::new(ConsoleRecorder))
    }

    pub fn with_recorder(config: ApiConfig, recorder: Arc<dyn Recorder>) -> BookStoreClient {
        BookStoreClient {
            config,
            inner: reqwest::Client::new(),
            recorder,
        }
    }

    pub async fn list_books(&self) -> Result<Response, Error> {
        self.execute(Method::GET, self.url(self.config.books_endpoint()), None)
            .await
    }

    pub async fn get_book(&self, id: i32) -> Result<Response, Error> {
        let path = resource_path(self.config.books_endpoint(), id);
        self.execute(Method::GET, self.url(&path), None).await
    }

    pub async fn create_book(&self, book: &Book) -> Result<Response, Error> {
        let body = serde_json::to_string(book)?;
        self.execute(
            Method::POST,
            self.url(self.config.books_endpoint()),
            Some(body),
        )
        .await
    }

    /// POST an arbitrary body to the books endpoint, bypassing
    /// serialization. Used to probe the service's malformed-input handling.
    pub async fn create_book_raw(&self, raw_body: impl Into<String>) -> Result<Response, Error> {
        self.execute(
            Method::POST,
            self.url(self.config.books_endpoint()),
            Some(raw_body.into()),
        )
        .await
    }

    pub async fn update_book(&self, id: i32, book: &Book) -> Result<Response, Error> {
        let body = serde_json::to_string(book)?;
        let path = resource_path(self.config.books_endpoint(), id);
        self.execute(Method::PUT, self.url(&path), Some(body)).await
    }

    pub async fn delete_book(&self, id: i32) -> Result<Response, Error> {
        let path = resource_path(self.config.books_endpoint(), id);
        self.execute(Method::DELETE, self.url(&path), None).await
    }

    pub async fn list_authors(&self) -> Result<Response, Error> {
        self.execute(Method::GET, self.url(self.config.authors_endpoint()), None)
            .await
    }

    pub async fn get_author(&self, id: i32) -> Result<Response, Error> {
        let path = resource_path(self.config.authors_endpoint(), id);
        self.execute(Method::GET, self.url(&path), None).await
    }

    pub async fn create_author(&self, author: &Author) -> Result<Response, Error> {
        let body = serde_json::to_string(author)?;
        self.execute(
            Method::POST,
            self.url(self.config.authors_endpoint()),
            Some(body),
        )
        .await
    }

    pub async fn create_author_raw(&self, raw_body: impl Into<String>) -> Result<Response, Error> {
        self.execute(
            Method::POST,
            self.url(self.config.authors_endpoint()),
            Some(raw_body.into()),
        )
        .await
    }

    pub async fn update_author(&self, id: i32, author: &Author) -> Result<Response, Error> {
        let body = serde_json::to_string(author)?;
        let path = resource_path(self.config.authors_endpoint(), id);
        self.execute(Method::PUT, self.url(&path), Some(body)).await
    }

    pub async fn delete_author(&self, id: i32) -> Result<Response, Error> {
        let path = resource_path(self.config.authors_endpoint(), id);
        self.execute(Method::DELETE, self.url(&path), None).await
    }

    /// The relational query: all authors referencing the given book.
    pub async fn list_authors_by_book(&self, book_id: i32) -> Result<Response, Error> {
        let path = format!(
            "{}/authors/books/{book_id}",
            self.config.authors_endpoint()
        );
        self.execute(Method::GET, self.url(&path), None).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    async fn execute(
        &self,
        method: Method,
        url: String,
        body: Option<String>,
    ) -> Result<Response, Error> {
        debug!("Requesting {method} {url}");
        let mut builder = self
            .inner
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let req = builder.build()?;

        let log_request = LogRequest {
            url: req.url().clone(),
            method: req.method().clone(),
            headers: req.headers().clone(),
        };

        match self.inner.execute(req).await {
            Ok(res) => {
                let res = Response::from(res).await;
                self.recorder.record(&CallLog {
                    request: log_request,
                    response: LogResponse {
                        status: Some(res.status),
                        headers: res.headers.clone(),
                        body: res.text.clone(),
                    },
                });
                Ok(res)
            }
            Err(e) => {
                self.recorder.record(&CallLog {
                    request: log_request,
                    response: LogResponse::default(),
                });
                Err(e.into())
            }
        }
    }
}

/// Join a resource endpoint with a numeric id. Ids are passed through
/// verbatim; the remote service is the authority on their validity.
pub(crate) fn resource_path(endpoint: &str, id: i32) -> String {
    format!("{endpoint}/{id}")
}
