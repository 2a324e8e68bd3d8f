//! REST adapter for a remote content store.

use super::{ContentStore, StoreError, StoreResult};
use async_trait::async_trait;
use folio_query::Query;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Content store reached over HTTP.
///
/// Collections are served at `/items/<collection>`; system collections
/// (`directus_<name>`) at `/<name>`. A per-request token takes precedence
/// over the configured static token.
pub struct HttpStore {
    base: Url,
    static_token: Option<String>,
    client: reqwest::Client,
}

/// Statuses that mean the requested resource is absent.
const ABSENT: [StatusCode; 1] = [StatusCode::NOT_FOUND];

/// A store answers 403 for an id the token cannot see, which includes ids
/// that do not exist.
const ITEM_ABSENT: [StatusCode; 2] = [StatusCode::NOT_FOUND, StatusCode::FORBIDDEN];

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: String,
}

impl HttpStore {
    /// Create a store client for the given base URL.
    pub fn new(base_url: &str, static_token: Option<String>, timeout: Duration) -> StoreResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| StoreError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidEndpoint(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base,
            static_token: static_token.filter(|t| !t.trim().is_empty()),
            client,
        })
    }

    fn endpoint(&self, collection: &str, id: Option<&str>) -> StoreResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidEndpoint(self.base.to_string()))?;
            segments.pop_if_empty();
            match collection.strip_prefix("directus_") {
                Some(system) => {
                    segments.push(system);
                }
                None => {
                    segments.push("items").push(collection);
                }
            }
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// GET an endpoint and unwrap the `data` envelope. `None` when the
    /// response status is one of `absent`.
    async fn get(
        &self,
        url: Url,
        query: &Query,
        token: Option<&str>,
        absent: &[StatusCode],
    ) -> StoreResult<Option<Value>> {
        tracing::debug!(url = %url, "Store request");

        let mut request = self.client.get(url).query(&query.to_params());
        if let Some(token) = token.or(self.static_token.as_deref()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if absent.contains(&status) {
            return Ok(None);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(StoreError::Unauthorized);
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let envelope: Envelope = serde_json::from_slice(&body)?;
        Ok(Some(envelope.data))
    }
}

fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::from_utf8_lossy(body).chars().take(200).collect(),
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn read_items(
        &self,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Vec<Value>> {
        let url = self.endpoint(collection, None)?;
        match self.get(url, query, token, &ABSENT).await? {
            None => Err(StoreError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: format!("collection {collection} not found"),
            }),
            Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(rows)) => Ok(rows),
            Some(_) => Err(StoreError::Malformed(format!(
                "expected a list of {collection} items"
            ))),
        }
    }

    async fn read_item(
        &self,
        collection: &str,
        id: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>> {
        let url = self.endpoint(collection, Some(id))?;
        Ok(self
            .get(url, query, token, &ITEM_ABSENT)
            .await?
            .filter(|v| !v.is_null()))
    }

    async fn read_singleton(
        &self,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>> {
        let url = self.endpoint(collection, None)?;
        Ok(self
            .get(url, query, token, &ABSENT)
            .await?
            .filter(|v| !v.is_null()))
    }
}
