use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::JwksResult;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A fetched key-set document, reduced to what the lookup needs to judge it.
#[derive(Debug, Clone)]
pub struct KeySetResponse {
    /// HTTP status code of the response.
    pub status: u16,

    /// Whether the status indicates success.
    pub ok: bool,

    /// The `content-type` header of the response, if any.
    pub content_type: Option<String>,

    /// Raw response body.
    pub body: Vec<u8>,
}

/// Capability for retrieving a key-set document.
///
/// The production implementation is [`HttpKeySetFetcher`]; tests substitute
/// canned responses. No retries, timeouts or caching happen at this layer;
/// callers that need them wrap their own.
#[async_trait]
pub trait FetchKeySet {
    /// Retrieves the key-set document at `uri`.
    async fn fetch(&self, uri: &str) -> JwksResult<KeySetResponse>;
}

/// A reqwest-backed key-set fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpKeySetFetcher {
    client: reqwest::Client,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl HttpKeySetFetcher {
    /// Creates a fetcher with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

#[async_trait]
impl FetchKeySet for HttpKeySetFetcher {
    async fn fetch(&self, uri: &str) -> JwksResult<KeySetResponse> {
        let response = self.client.get(uri).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        tracing::debug!(uri, status = status.as_u16(), "fetched key set");

        Ok(KeySetResponse {
            status: status.as_u16(),
            ok: status.is_success(),
            content_type,
            body: response.bytes().await?.to_vec(),
        })
    }
}
