//! HTTP revision source.

use crate::error::{ErrorKind, Result};
use crate::models::{PageQuery, RevisionPage};
use crate::source::RevisionSource;
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::{Client, Url};
use tracing::instrument;

/// Header carrying the API nonce.
pub const NONCE_HEADER: &str = "X-WP-Nonce";

/// Fetches revisions from the revisions REST endpoint.
///
/// Requests are authenticated with the nonce header and the client keeps a
/// cookie store, the equivalent of sending credentials with every request.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    api_base: Url,
    nonce: String,
}
impl HttpSource {
    pub fn new(api_base: Url, nonce: impl Into<String>) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build().or_raise(|| ErrorKind::Client)?;
        Ok(Self::with_client(client, api_base, nonce))
    }

    /// Use a preconfigured [`Client`] (proxies, timeouts, shared cookie jar).
    pub fn with_client(client: Client, api_base: Url, nonce: impl Into<String>) -> Self {
        Self {
            client,
            api_base,
            nonce: nonce.into(),
        }
    }

    /// Builds `{api_base path}/revisions/{post_id}/?paged={page}&per_page={per_page}`
    /// on the API base's origin.
    pub(crate) fn endpoint(&self, query: &PageQuery) -> Result<Url> {
        let path = format!("{}/revisions/{}/", self.api_base.path().trim_end_matches('/'), query.post_id);
        let mut url = self.api_base.join(&path).or_raise(|| ErrorKind::InvalidEndpoint(path.clone()))?;
        url.query_pairs_mut()
            .append_pair("paged", &query.page.to_string())
            .append_pair("per_page", &query.per_page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl RevisionSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(api_base = %self.api_base))]
    async fn fetch_page(&self, query: &PageQuery) -> Result<RevisionPage> {
        let url = self.endpoint(query)?;
        let response = self
            .client
            .get(url.clone())
            .header(NONCE_HEADER, &self.nonce)
            .send()
            .await
            .or_raise(|| ErrorKind::Network(url.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let page: RevisionPage = response.json().await.or_raise(|| ErrorKind::Decode)?;
        tracing::debug!(revisions = page.revisions.len(), has_more = page.has_more, "Fetched revisions page");
        Ok(page)
    }
}
