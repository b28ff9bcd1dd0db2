use scraper::Html;
use std::future::Future;
use std::time::Duration;

use crate::cache::ResponseCache;
use crate::constants::USER_AGENT;
use crate::error::{ParserError, Result, TransportError};

const GET: &str = "GET";

/// Something that can download a URL.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = std::result::Result<Vec<u8>, TransportError>>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> std::result::Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Fetches pages through a transparent response cache.
pub struct FetchSession<T: Transport = HttpTransport> {
    transport: T,
    cache: ResponseCache,
}

impl<T: Transport> FetchSession<T> {
    pub fn new(transport: T, cache: ResponseCache) -> Self {
        Self { transport, cache }
    }

    pub fn clear_cache(&self) -> Result<usize> {
        self.cache.clear()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Raw response body, served from the cache when present.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(GET, url)? {
            log::debug!("Cache hit: {}", url);
            return Ok(body);
        }

        log::debug!("Fetching: {}", url);
        let body = self
            .transport
            .get(url)
            .await
            .map_err(|source| ParserError::FetchFailed {
                url: url.to_string(),
                source,
            })?;

        self.cache.put(GET, url, &body)?;
        Ok(body)
    }

    /// Fetch a page and parse it, decoding the body as UTF-8.
    pub async fn get_document(&self, url: &str) -> Result<Html> {
        let body = self.get_bytes(url).await?;
        Ok(Html::parse_document(&String::from_utf8_lossy(&body)))
    }
}
