//! release
//!
//! GitHub release metadata and asset download client.
//!
//! # Design
//!
//! Delegate binaries are published as assets on the latest release of the
//! configured repository. This module fetches release metadata via the
//! REST API and downloads individual assets.
//!
//! Asset downloads disable automatic redirect handling and follow at most
//! one `301`/`302` hop by hand: release asset URLs redirect once to a
//! storage host, and the redirect target must answer `200`. Longer chains
//! fail loudly instead of being chased.
//!
//! Downloaded bytes are streamed to a `.tmp` sibling of the destination
//! and renamed into place, so a failed download never leaves a truncated
//! file at the install path.
//!
//! # API Base
//!
//! The API base URL is configurable, both for GitHub Enterprise
//! installations and as the seam the HTTP tests use to point the client
//! at a local mock server.

use std::io::Write;
use std::path::{Path, PathBuf};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, LOCATION, USER_AGENT};
use reqwest::{redirect, Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "stagehand-cli";

/// Errors from release operations.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("release host answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse release metadata: {0}")]
    Parse(reqwest::Error),

    #[error("no asset named '{name}' in release {tag}")]
    AssetNotFound { name: String, tag: String },

    #[error("download of '{url}' answered {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error("redirect from '{url}' carried no usable Location header")]
    RedirectLocation { url: String },

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Client for the release REST API.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    /// HTTP client with redirects disabled.
    client: Client,
    /// API base URL.
    api_base: String,
}

impl ReleaseClient {
    /// Create a client against the default GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Client`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new() -> Result<Self, ReleaseError> {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Create a client against a custom API base URL.
    ///
    /// Used for GitHub Enterprise installations and by tests pointing at
    /// a mock server.
    pub fn with_api_base(api_base: impl Into<String>) -> Result<Self, ReleaseError> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .default_headers(default_headers())
            .build()
            .map_err(ReleaseError::Client)?;

        Ok(Self {
            client,
            api_base: api_base.into(),
        })
    }

    /// The API base URL this client talks to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetch metadata for the latest release of `owner/repo`.
    ///
    /// # Errors
    ///
    /// Any transport, status, or parse failure is an error; the installer
    /// treats them all as download failures.
    pub async fn latest_release(&self, owner: &str, repo: &str) -> Result<Release, ReleaseError> {
        let url = self.latest_release_url(owner, repo);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ReleaseError::Network)?;

        handle_response(response).await
    }

    /// Build the URL for the latest-release endpoint.
    fn latest_release_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base, owner, repo
        )
    }

    /// Download a release asset to `dest`.
    ///
    /// Follows at most one `301`/`302` redirect; the redirect target must
    /// answer `200` directly.
    pub async fn download_asset(
        &self,
        asset: &ReleaseAsset,
        dest: &Path,
    ) -> Result<(), ReleaseError> {
        let response = self.get_following_once(&asset.browser_download_url).await?;
        write_body(response, dest).await
    }

    /// GET `url`, following at most one redirect hop.
    async fn get_following_once(&self, url: &str) -> Result<Response, ReleaseError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ReleaseError::Network)?;

        let status = response.status();
        if status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
                .ok_or_else(|| ReleaseError::RedirectLocation {
                    url: url.to_string(),
                })?;

            let redirected = self
                .client
                .get(&location)
                .send()
                .await
                .map_err(ReleaseError::Network)?;

            if redirected.status() != StatusCode::OK {
                return Err(ReleaseError::DownloadStatus {
                    url: location,
                    status: redirected.status().as_u16(),
                });
            }
            return Ok(redirected);
        }

        if status != StatusCode::OK {
            return Err(ReleaseError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

/// Stream a response body to `dest` via a `.tmp` sibling, then rename.
async fn write_body(mut response: Response, dest: &Path) -> Result<(), ReleaseError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReleaseError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = dest.with_extension("tmp");
    {
        let mut file = std::fs::File::create(&temp_path).map_err(|e| ReleaseError::Io {
            path: temp_path.clone(),
            source: e,
        })?;

        while let Some(chunk) = response.chunk().await.map_err(ReleaseError::Network)? {
            file.write_all(&chunk).map_err(|e| ReleaseError::Io {
                path: temp_path.clone(),
                source: e,
            })?;
        }

        file.sync_all().map_err(|e| ReleaseError::Io {
            path: temp_path.clone(),
            source: e,
        })?;
    }

    std::fs::rename(&temp_path, dest).map_err(|e| ReleaseError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Handle an API response, mapping errors appropriately.
async fn handle_response<T: for<'de> Deserialize<'de>>(
    response: Response,
) -> Result<T, ReleaseError> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(ReleaseError::Parse)
    } else {
        // Try to get an error message from the body.
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "unknown error".to_string(),
        };
        Err(ReleaseError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Common headers for API requests.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}

// --------------------------------------------------------------------------
// Wire types
// --------------------------------------------------------------------------

/// A release as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag, e.g. `v0.3.1`.
    pub tag_name: String,
    /// Downloadable assets attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Find an asset by exact name.
    ///
    /// Matching is exact string equality; a renamed asset is a miss, not
    /// a fuzzy hit.
    pub fn find_asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// A single downloadable release asset.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset file name.
    pub name: String,
    /// Direct download URL (redirects once to the storage host).
    pub browser_download_url: String,
}

/// Error body returned by the API.
#[derive(Deserialize)]
struct ApiErrorResponse {
    message: String,
}
