//! Registry and package index lookups.
//!
//! Every lookup yields a [`Lookup`]: a 404 is a normal `NotFound`, anything
//! else that goes wrong is `Unavailable` and is logged here, at the failure
//! site, so callers only have to fall back to defaults.

pub mod github;
pub mod pypi;

#[cfg(test)]
pub(crate) mod stub;

use crate::model::{PackageStats, RepoStats};

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_PYPI_API: &str = "https://pypi.org";

const USER_AGENT: &str = concat!("statusboard/", env!("CARGO_PKG_VERSION"));

/// Result of a single lookup.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Unavailable(FetchError),
}

impl<T> Lookup<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Why a lookup could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("network lookups disabled")]
    Offline,
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => FetchError::Status {
                status,
                url: response.get_url().to_string(),
            },
            ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
        }
    }
}

/// Source of registry and package index data.
pub trait StatsSource {
    fn repository(&self, owner: &str, repo: &str) -> Lookup<RepoStats>;
    fn package(&self, name: &str) -> Lookup<PackageStats>;
}

/// Connection settings for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub github_api: String,
    pub pypi_api: String,
    /// Bearer token for the registry; raises rate limits when present.
    pub token: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            github_api: DEFAULT_GITHUB_API.to_string(),
            pypi_api: DEFAULT_PYPI_API.to_string(),
            token: None,
        }
    }
}

/// Blocking HTTP client for the public GitHub and PyPI APIs.
pub struct HttpSource {
    agent: ureq::Agent,
    github_api: String,
    pypi_api: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            github_api: config.github_api.trim_end_matches('/').to_string(),
            pypi_api: config.pypi_api.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        }
    }

    fn github_get(&self, path: &str) -> Result<ureq::Response, ureq::Error> {
        let mut request = self
            .agent
            .get(&format!("{}{}", self.github_api, path))
            .set("Accept", "application/vnd.github.v3+json");
        if let Some(ref token) = self.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }
        request.call()
    }

    fn pypi_get(&self, path: &str) -> Result<ureq::Response, ureq::Error> {
        self.agent
            .get(&format!("{}{}", self.pypi_api, path))
            .set("Accept", "application/json")
            .call()
    }
}

impl StatsSource for HttpSource {
    fn repository(&self, owner: &str, repo: &str) -> Lookup<RepoStats> {
        let lookup = github::repository(self, owner, repo);
        if let Lookup::Unavailable(ref err) = lookup {
            tracing::warn!(repository = %format!("{owner}/{repo}"), "error fetching stats: {err}");
        }
        lookup
    }

    fn package(&self, name: &str) -> Lookup<PackageStats> {
        let lookup = pypi::package(self, name);
        if let Lookup::Unavailable(ref err) = lookup {
            tracing::warn!(package = %name, "error fetching package stats: {err}");
        }
        lookup
    }
}

/// Answers every lookup with `Unavailable`, leaving catalog overrides as the
/// only data.
pub struct OfflineSource;

impl StatsSource for OfflineSource {
    fn repository(&self, _owner: &str, _repo: &str) -> Lookup<RepoStats> {
        Lookup::Unavailable(FetchError::Offline)
    }

    fn package(&self, _name: &str) -> Lookup<PackageStats> {
        Lookup::Unavailable(FetchError::Offline)
    }
}

/// Map a finished request onto a [`Lookup`], decoding the body on success.
fn classify<T>(
    result: Result<ureq::Response, ureq::Error>,
    decode: impl FnOnce(ureq::Response) -> Result<T, FetchError>,
) -> Lookup<T> {
    match result {
        Ok(response) => match decode(response) {
            Ok(value) => Lookup::Found(value),
            Err(err) => Lookup::Unavailable(err),
        },
        Err(ureq::Error::Status(404, _)) => Lookup::NotFound,
        Err(err) => Lookup::Unavailable(err.into()),
    }
}

/// Decode a JSON body, keeping the URL for the error message.
fn decode_json<T: serde::de::DeserializeOwned>(response: ureq::Response) -> Result<T, FetchError> {
    let url = response.get_url().to_string();
    response
        .into_json()
        .map_err(|source| FetchError::Decode { url, source })
}
