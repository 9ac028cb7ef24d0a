//! # Request Module
//!
//! All outbound HTTP made on behalf of the generator goes through a
//! [`RequestQueue`]. The queue wraps a [`Transport`] with a fair semaphore:
//! callers are admitted in FIFO order and at most `concurrency` requests are
//! in flight at once, however many generation jobs are waiting on it.
//!
//! There is no retry and no timeout at this layer. A failed request comes
//! back to the caller as [`GenerateError::Fetch`].
//!
//! ```rust,ignore
//! use apigen::request::{HttpTransport, RequestQueue, RequestSpec};
//!
//! let queue = RequestQueue::new(HttpTransport::new()?, 50);
//! let body = queue.enqueue(RequestSpec::get(url)).await?;
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::error::{GenerateError, Result};

/// A GET request as the generator describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: String,
    /// Passed through to the transport untouched
    pub headers: BTreeMap<String, String>,
}

impl RequestSpec {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Issues one request and returns the decoded JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, spec: &RequestSpec) -> Result<Value>;
}

/// [`Transport`] backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("apigen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerateError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, spec: &RequestSpec) -> Result<Value> {
        let mut builder = self.client.get(&spec.url);
        for (name, value) in &spec.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GenerateError::fetch(&spec.url, e))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| GenerateError::fetch(&spec.url, e))?;
        serde_json::from_slice(&body).map_err(|e| GenerateError::parse(&spec.url, e))
    }
}

/// Bounded-concurrency gate in front of a [`Transport`].
pub struct RequestQueue<T> {
    transport: T,
    permits: Semaphore,
    concurrency: usize,
}

impl<T: Transport> RequestQueue<T> {
    pub fn new(transport: T, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            transport,
            permits: Semaphore::new(concurrency),
            concurrency,
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Wait for a slot, then run the request. The slot is released when the
    /// request settles, successfully or not.
    pub async fn enqueue(&self, spec: RequestSpec) -> Result<Value> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| GenerateError::fetch(&spec.url, e))?;
        tracing::trace!(url = %spec.url, "request admitted");
        self.transport.request(&spec).await
    }

    /// [`enqueue`](Self::enqueue) and decode the body into `D`.
    pub async fn fetch<D: DeserializeOwned>(&self, spec: RequestSpec) -> Result<D> {
        let url = spec.url.clone();
        let body = self.enqueue(spec).await?;
        serde_json::from_value(body).map_err(|e| GenerateError::parse(url, e))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records peak concurrency and completion order.
    #[derive(Default)]
    struct CountingTransport {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        completed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn request(&self, spec: &RequestSpec) -> Result<Value> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed.lock().unwrap().push(spec.url.clone());
            if spec.url.ends_with("/fail") {
                return Err(GenerateError::fetch(&spec.url, "HTTP 500"));
            }
            Ok(serde_json::json!({"url": spec.url}))
        }
    }

    #[tokio::test]
    async fn test_queue_never_exceeds_ceiling() {
        let queue = RequestQueue::new(CountingTransport::default(), 3);
        let calls = (0..20).map(|i| queue.enqueue(RequestSpec::get(format!("https://x/{i}"))));
        let results = futures::future::join_all(calls).await;
        assert!(results.iter().all(|r| r.is_ok()));
        let peak = queue.transport().peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak concurrency was {peak}");
        assert!(peak >= 2, "requests never overlapped");
        assert_eq!(queue.transport().completed.lock().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_releases_slot() {
        let queue = RequestQueue::new(CountingTransport::default(), 1);
        let err = queue
            .enqueue(RequestSpec::get("https://x/fail"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Fetch { .. }));
        // The single slot must be free again.
        let ok = queue.enqueue(RequestSpec::get("https://x/ok")).await.unwrap();
        assert_eq!(ok["url"], "https://x/ok");
    }

    #[tokio::test]
    async fn test_fetch_decodes_or_reports_parse_error() {
        #[derive(serde::Deserialize)]
        struct Body {
            url: String,
        }
        let queue = RequestQueue::new(CountingTransport::default(), 2);
        let body: Body = queue.fetch(RequestSpec::get("https://x/a")).await.unwrap();
        assert_eq!(body.url, "https://x/a");

        let err = queue
            .fetch::<Vec<u8>>(RequestSpec::get("https://x/b"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Parse { .. }));
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let queue = RequestQueue::new(CountingTransport::default(), 0);
        assert_eq!(queue.concurrency(), 1);
    }

    #[test]
    fn test_request_spec_headers() {
        let spec = RequestSpec::get("https://x").header("X-User-Ip", "0.0.0.0");
        assert_eq!(spec.headers.get("X-User-Ip").map(String::as_str), Some("0.0.0.0"));
    }
}
