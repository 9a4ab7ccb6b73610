//! Endpoint configuration.
//!
//! Each endpoint URL is resolved with a fixed precedence:
//!
//! 1. an explicit override (environment variable or CLI flag) always wins;
//! 2. when the client runs against a non-local origin, the hosted API;
//! 3. otherwise the relative `/api/<endpoint>` path on the local origin.

use std::{env, fmt};

use url::Url;

use crate::error::ConfigError;

/// Hosted API used when running against a deployed origin.
pub const REMOTE_API_BASE: &str = "https://prompt-api.questionlearn.cn/api/";

/// Local origin the relative paths are resolved against (the dev proxy).
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

const ORIGIN_ENV: &str = "PROMPT_HUB_ORIGIN";
const PROXY_ENV: &str = "PROMPT_HUB_PROXY_URL";

/// The three read-only resources of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /api/platforms`
    Platforms,
    /// `GET /api/prompts`
    Prompts,
    /// `GET /api/articles` and `GET /api/articles/{id}`
    Articles,
}

impl Endpoint {
    /// Last path segment.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Platforms => "platforms",
            Endpoint::Prompts => "prompts",
            Endpoint::Articles => "articles",
        }
    }

    /// Path used when falling back to the local origin.
    pub fn relative_path(self) -> &'static str {
        match self {
            Endpoint::Platforms => "/api/platforms",
            Endpoint::Prompts => "/api/prompts",
            Endpoint::Articles => "/api/articles",
        }
    }

    /// Environment variable holding an explicit URL for this endpoint.
    pub fn env_var(self) -> &'static str {
        match self {
            Endpoint::Platforms => "PROMPT_HUB_PLATFORMS_API_URL",
            Endpoint::Prompts => "PROMPT_HUB_PROMPTS_API_URL",
            Endpoint::Articles => "PROMPT_HUB_ARTICLES_API_URL",
        }
    }

    /// Message used when the envelope reports failure without one.
    pub fn failure_message(self) -> &'static str {
        match self {
            Endpoint::Platforms => "获取平台列表失败",
            Endpoint::Prompts => "获取提示词列表失败",
            Endpoint::Articles => "获取文章失败",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw, unvalidated client settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the client runs against; decides local vs. hosted defaults.
    pub origin: Option<String>,
    /// Explicit platforms endpoint URL; each explicit URL always wins.
    pub platforms_url: Option<String>,
    /// Explicit prompts endpoint URL.
    pub prompts_url: Option<String>,
    /// Explicit articles endpoint URL.
    pub articles_url: Option<String>,
    /// Optional HTTP(S) proxy for every request.
    pub proxy_url: Option<String>,
}

impl ClientConfig {
    /// Read settings from `PROMPT_HUB_*` variables; blank values are ignored.
    pub fn from_env() -> Self {
        Self {
            origin: env_value(ORIGIN_ENV),
            platforms_url: env_value(Endpoint::Platforms.env_var()),
            prompts_url: env_value(Endpoint::Prompts.env_var()),
            articles_url: env_value(Endpoint::Articles.env_var()),
            proxy_url: env_value(PROXY_ENV),
        }
    }

    /// Layer `overrides` on top of `self`; set, non-blank fields win.
    pub fn merge(self, overrides: ClientConfig) -> Self {
        Self {
            origin: non_blank(overrides.origin).or(self.origin),
            platforms_url: non_blank(overrides.platforms_url).or(self.platforms_url),
            prompts_url: non_blank(overrides.prompts_url).or(self.prompts_url),
            articles_url: non_blank(overrides.articles_url).or(self.articles_url),
            proxy_url: non_blank(overrides.proxy_url).or(self.proxy_url),
        }
    }

    /// Explicit URL configured for `endpoint`.
    pub fn override_for(&self, endpoint: Endpoint) -> Option<&str> {
        let value = match endpoint {
            Endpoint::Platforms => self.platforms_url.as_deref(),
            Endpoint::Prompts => self.prompts_url.as_deref(),
            Endpoint::Articles => self.articles_url.as_deref(),
        };
        value.map(str::trim).filter(|value| !value.is_empty())
    }

    /// Validate and resolve every endpoint URL.
    pub fn resolve(&self) -> Result<ResolvedEndpoints, ConfigError> {
        let origin_raw = self
            .origin
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_ORIGIN);
        let origin = parse_url("origin", origin_raw)?;

        Ok(ResolvedEndpoints {
            platforms: resolve_endpoint(
                Endpoint::Platforms,
                self.override_for(Endpoint::Platforms),
                &origin,
            )?,
            prompts: resolve_endpoint(
                Endpoint::Prompts,
                self.override_for(Endpoint::Prompts),
                &origin,
            )?,
            articles: resolve_endpoint(
                Endpoint::Articles,
                self.override_for(Endpoint::Articles),
                &origin,
            )?,
        })
    }
}

/// Final URL of each endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoints {
    pub platforms: Url,
    pub prompts: Url,
    pub articles: Url,
}

impl ResolvedEndpoints {
    /// URL for `endpoint`.
    pub fn url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Platforms => &self.platforms,
            Endpoint::Prompts => &self.prompts,
            Endpoint::Articles => &self.articles,
        }
    }
}

/// Resolve one endpoint: override, then hosted default, then local path.
pub fn resolve_endpoint(
    endpoint: Endpoint,
    override_url: Option<&str>,
    origin: &Url,
) -> Result<Url, ConfigError> {
    if let Some(explicit) = override_url {
        return parse_url(endpoint.env_var(), explicit);
    }

    if !is_local_origin(origin) {
        let base = parse_url("remote api base", REMOTE_API_BASE)?;
        return base
            .join(endpoint.name())
            .map_err(|source| ConfigError::InvalidUrl {
                name: "remote api base",
                value: REMOTE_API_BASE.to_string(),
                source,
            });
    }

    origin
        .join(endpoint.relative_path())
        .map_err(|source| ConfigError::InvalidUrl {
            name: "origin",
            value: origin.to_string(),
            source,
        })
}

/// `localhost` and `127.0.0.1` count as local.
pub fn is_local_origin(origin: &Url) -> bool {
    matches!(origin.host_str(), Some("localhost") | Some("127.0.0.1"))
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}

fn env_value(key: &str) -> Option<String> {
    non_blank(env::var(key).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
