//! Release update check against the GitHub releases API.

use std::time::Duration;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wayfile_core::{Version, is_newer_version};

const GITHUB_API: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Subset of the `releases/latest` response.
#[derive(Debug, Clone, Default, Deserialize)]
struct Release {
    tag_name: Option<String>,
    name: Option<String>,
    body: Option<String>,
    html_url: Option<String>,
    published_at: Option<String>,
}

/// Details of the latest published release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseInfo {
    /// Version with any leading `v` removed.
    pub version: String,
    pub title: String,
    pub body: String,
    pub html_url: String,
    pub published_at: Option<String>,
}

/// Outcome of an update check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateCheck {
    pub current_version: String,
    /// `None` when the repository has no release.
    pub latest: Option<ReleaseInfo>,
    pub update_available: bool,
}

impl UpdateCheck {
    fn from_release(release: Release, repo: &str, current: &str) -> Self {
        let latest = release.tag_name.filter(|tag| !tag.trim().is_empty()).map(|tag| {
            let version = tag.trim().trim_start_matches('v').to_string();
            ReleaseInfo {
                title: release.name.filter(|n| !n.is_empty()).unwrap_or_else(|| tag.clone()),
                body: release.body.unwrap_or_default(),
                html_url: release
                    .html_url
                    .unwrap_or_else(|| format!("https://github.com/{repo}/releases/latest")),
                published_at: release.published_at,
                version,
            }
        });
        let update_available = latest
            .as_ref()
            .is_some_and(|info| is_newer_version(&info.version, current));

        Self {
            current_version: current.to_string(),
            latest,
            update_available,
        }
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        match &self.latest {
            Some(info) if self.update_available => format!(
                "Update available: {} -> {} ({})",
                Version::parse(&self.current_version),
                Version::parse(&info.version),
                info.html_url
            ),
            Some(info) => format!(
                "wayfile {} is up to date (latest release {})",
                self.current_version, info.version
            ),
            None => format!(
                "wayfile {} (no published releases found)",
                self.current_version
            ),
        }
    }
}

/// Query the latest release of `repo` (`owner/name`).
pub async fn check(repo: &str, current: &str) -> Result<UpdateCheck> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("wayfile/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .wrap_err("Failed to build HTTP client")?;

    let url = format!("{GITHUB_API}/repos/{repo}/releases/latest");
    debug!(%url, "Checking for updates");
    let response = client
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .send()
        .await
        .wrap_err("Failed to reach the releases API")?;

    // A repository without releases answers 404.
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(UpdateCheck::from_release(Release::default(), repo, current));
    }

    let release: Release = response
        .error_for_status()
        .wrap_err("Releases API returned an error")?
        .json()
        .await
        .wrap_err("Invalid release response")?;

    Ok(UpdateCheck::from_release(release, repo, current))
}
