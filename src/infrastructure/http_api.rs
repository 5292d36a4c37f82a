//! reqwest implementation of [`BookApi`]

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{BookApi, ClientError, ErrorBody};
use crate::models::{Book, BookId, BookPayload};

const USER_AGENT: &str = concat!("book-catalog-form/", env!("CARGO_PKG_VERSION"));

/// Catalog backend reached over HTTP.
///
/// No timeout and no retry: each call is a single round trip.
#[derive(Clone)]
pub struct HttpBookApi {
    client: Client,
    base_url: Url,
}

impl HttpBookApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build client: {}", e)))?;

        let mut base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Transport(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Transport(format!(
                "Invalid base URL '{}': cannot hold a path",
                base_url
            )));
        }
        base_url.set_query(None);
        base_url.set_fragment(None);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn collection_url(&self) -> Url {
        self.endpoint(&[])
    }

    // Ids are opaque, so each one is a single percent-encoded path segment
    fn item_url(&self, id: &BookId) -> Url {
        self.endpoint(&[id.as_str()])
    }

    fn endpoint(&self, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(): the base URL can hold a path
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "books"]).extend(tail);
        }
        url
    }
}

/// Turn a non-success response into [`ClientError::Http`]
async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    // An unreadable body is treated like an unparseable one
    let raw = resp.text().await.unwrap_or_default();
    Err(ClientError::Http {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        body: ErrorBody::parse(&raw),
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let body = resp.text().await?;

    serde_json::from_str(&body)
        .map_err(|e| ClientError::Decode(format!("Failed to parse JSON: {}", e)))
}

async fn send(request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
    let resp = request.send().await?;
    check_status(resp).await
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list(&self) -> Result<Vec<Book>, ClientError> {
        let url = self.collection_url();
        tracing::debug!("GET {}", url);

        let resp = send(self.client.get(url)).await?;
        read_json(resp).await
    }

    async fn get(&self, id: &BookId) -> Result<Book, ClientError> {
        let url = self.item_url(id);
        tracing::debug!("GET {}", url);

        let resp = send(self.client.get(url)).await?;
        read_json(resp).await
    }

    async fn create(&self, book: &BookPayload) -> Result<(), ClientError> {
        let url = self.collection_url();
        tracing::debug!("POST {}", url);

        // reqwest's json() sets Content-Type: application/json
        send(self.client.post(url).json(book)).await?;
        Ok(())
    }

    async fn update(&self, id: &BookId, book: &BookPayload) -> Result<(), ClientError> {
        let url = self.item_url(id);
        tracing::debug!("PUT {}", url);

        send(self.client.put(url).json(book)).await?;
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> Result<(), ClientError> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);

        send(self.client.delete(url)).await?;
        Ok(())
    }
}
