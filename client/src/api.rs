//! HTTP access to the Prompt Hub API.

use async_trait::async_trait;
use prompt_hub_shared::{
    projection::active_platforms,
    wire::{ApiResponse, ArticleResponse, PageResponse, PlatformResponse, PromptResponse},
    ArticleItem, ArticleQuery, Page, Platform, PromptItem, PromptQuery,
};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    StatusCode,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::{ClientConfig, Endpoint, ResolvedEndpoints},
    error::{ApiError, ConfigError, ProtocolError},
};

/// Read operations the front-end needs, already projected to display records.
///
/// Controllers depend on this trait so they can run against a stub.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Active platforms ordered by `SortOrder`.
    async fn fetch_platforms(&self) -> Result<Vec<Platform>, ApiError>;

    /// One page of prompts.
    async fn fetch_prompts(&self, query: &PromptQuery) -> Result<Page<PromptItem>, ApiError>;

    /// One page of articles.
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Page<ArticleItem>, ApiError>;

    /// A single article; HTTP 404 becomes [`ApiError::NotFound`].
    async fn fetch_article(&self, id: &str) -> Result<ArticleItem, ApiError>;
}

/// reqwest-backed client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: ResolvedEndpoints,
}

impl ApiClient {
    /// Build a client from unresolved settings.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let endpoints = config.resolve()?;

        let mut builder = reqwest::Client::builder();
        if let Some(proxy_url) = config.proxy_url.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|source| {
                ConfigError::InvalidProxy {
                    value: proxy_url.to_string(),
                    source,
                }
            })?;
            builder = builder.proxy(proxy);
        }
        let http = builder.build().map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            endpoints,
        })
    }

    /// Client from `PROMPT_HUB_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&ClientConfig::from_env())
    }

    /// Resolved endpoint URLs.
    pub fn endpoints(&self) -> &ResolvedEndpoints {
        &self.endpoints
    }

    /// `GET` an endpoint and unwrap its envelope into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoints.url(endpoint).clone();
        self.request(endpoint, url, params).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(%endpoint, %url, ?params, "api request");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .query(params)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::HttpStatus(status.as_u16()).into());
        }

        let body = response.bytes().await.map_err(ApiError::Network)?;
        decode_envelope(endpoint, &body)
    }
}

/// Check the envelope `code` and decode `data` as `T`.
pub fn decode_envelope<T: DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> Result<T, ApiError> {
    let envelope: ApiResponse = serde_json::from_slice(body).map_err(ProtocolError::Body)?;
    if !envelope.is_success() {
        let message = if envelope.message.trim().is_empty() {
            endpoint.failure_message().to_string()
        } else {
            envelope.message
        };
        return Err(ProtocolError::Envelope {
            code: envelope.code,
            message,
        }
        .into());
    }

    serde_json::from_value(envelope.data).map_err(|err| ProtocolError::Body(err).into())
}

fn log_failure<T>(endpoint: Endpoint, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(err) = &result {
        tracing::error!(%endpoint, "{}: {err}", endpoint.failure_message());
    }
    result
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn fetch_platforms(&self) -> Result<Vec<Platform>, ApiError> {
        let raw = self
            .get::<Vec<PlatformResponse>>(Endpoint::Platforms, &[])
            .await;
        log_failure(Endpoint::Platforms, raw.map(active_platforms))
    }

    async fn fetch_prompts(&self, query: &PromptQuery) -> Result<Page<PromptItem>, ApiError> {
        let raw = self
            .get::<PageResponse<PromptResponse>>(Endpoint::Prompts, &query.to_params())
            .await;
        log_failure(Endpoint::Prompts, raw.map(Page::from))
    }

    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Page<ArticleItem>, ApiError> {
        let raw = self
            .get::<PageResponse<ArticleResponse>>(Endpoint::Articles, &query.to_params())
            .await;
        log_failure(Endpoint::Articles, raw.map(Page::from))
    }

    async fn fetch_article(&self, id: &str) -> Result<ArticleItem, ApiError> {
        let mut url = self.endpoints.articles.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }

        let raw = self
            .request::<ArticleResponse>(Endpoint::Articles, url, &[])
            .await;
        let result = match raw {
            Ok(article) => Ok(ArticleItem::from(article)),
            Err(err) if err.http_status() == Some(StatusCode::NOT_FOUND.as_u16()) => {
                tracing::warn!(article_id = id, "article not found");
                return Err(ApiError::NotFound {
                    resource: "article",
                    id: id.to_string(),
                });
            },
            Err(err) => Err(err),
        };
        log_failure(Endpoint::Articles, result)
    }
}

#[cfg(test)]
mod tests {
    use prompt_hub_shared::PromptCategory;

    use super::*;

    #[test]
    fn envelope_with_nonzero_code_is_protocol_error() {
        let body = br#"{"code": 500, "message": "", "data": null}"#;
        let err = decode_envelope::<Vec<PlatformResponse>>(Endpoint::Platforms, body)
            .expect_err("non-zero code");
        match err {
            ApiError::Protocol(ProtocolError::Envelope {
                code,
                message,
            }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "获取平台列表失败");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn envelope_data_decodes_into_page() {
        let body = br#"{"code": 0, "message": "ok", "data": {
            "items": [{"ID": 1, "Category": "text", "Title": "Weekly report",
                       "Description": "Summarise {notes}", "Tags": [], "Professions": []}],
            "page": 1, "pageSize": 10, "total": 1
        }}"#;
        let page: PageResponse<PromptResponse> =
            decode_envelope(Endpoint::Prompts, body).expect("decode");
        let page = Page::<PromptItem>::from(page);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "1");
        assert_eq!(page.items[0].category, PromptCategory::Text);
    }

    #[test]
    fn garbage_body_is_protocol_error() {
        let err = decode_envelope::<Vec<PlatformResponse>>(Endpoint::Platforms, b"<html>")
            .expect_err("not json");
        assert!(matches!(err, ApiError::Protocol(ProtocolError::Body(_))));
    }
}
