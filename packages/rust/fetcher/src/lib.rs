//! Upstream README retrieval.
//!
//! One plain GET per run. A non-success status aborts the whole update with
//! [`SkillSyncError::Fetch`]; there is no retry and no fallback.

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use skillsync_shared::{Result, SkillSyncError};

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("skillsync/", env!("CARGO_PKG_VERSION"));

/// Fetch the document at `url` and return its body as text.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_readme(url: &Url) -> Result<String> {
    let client = build_client()?;

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| SkillSyncError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SkillSyncError::fetch(url.as_str(), status.to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| SkillSyncError::Network(format!("{url}: failed to read body: {e}")))?;

    debug!(%status, "response received");
    info!(bytes = body.len(), "README fetched");

    Ok(body)
}

/// Build a reqwest client; timeouts and redirects stay at reqwest defaults.
fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SkillSyncError::Network(format!("failed to build HTTP client: {e}")))
}
