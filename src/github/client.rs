use std::sync::Arc;

use anyhow::{Context, Result};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::github::{auth, pulls};
use crate::types::{PullRequest, RepoRef};
use crate::workflow::{PullRequestSource, ReviewerRequester};

/// GitHub REST client backing the PR source and reviewer-request sink.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Arc<Octocrab>,
}

impl GitHubClient {
    /// Build an authenticated client for `host` (`github.com` or a GHE host).
    ///
    /// octocrab's retry layer is disabled: a failed call fails the run once,
    /// and re-running is left to the caller.
    pub fn connect(host: &str) -> Result<Self> {
        let token = auth::resolve_token(host)?;

        let builder = Octocrab::builder()
            .personal_token(token)
            .add_retry_config(RetryConfig::None);
        let builder = if host == "github.com" {
            builder
        } else {
            builder
                .base_uri(format!("https://{host}/api/v3"))
                .context("setting GHE base URI")?
        };

        let octocrab = builder.build().context("building octocrab instance")?;
        Ok(Self::from_octocrab(octocrab))
    }

    /// Unauthenticated client against an arbitrary API root, with the same
    /// no-retry policy as [`GitHubClient::connect`].
    pub fn with_base_uri(base_uri: &str) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(base_uri)
            .with_context(|| format!("setting base URI {base_uri:?}"))?
            .build()
            .context("building octocrab instance")?;
        Ok(Self::from_octocrab(octocrab))
    }

    /// Wrap an already configured instance (custom base URI, tests).
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self {
            octocrab: Arc::new(octocrab),
        }
    }
}

impl PullRequestSource for GitHubClient {
    async fn list_open_pull_requests(&self, repo: &RepoRef) -> Result<Vec<PullRequest>> {
        pulls::list_open(&self.octocrab, repo).await
    }
}

impl ReviewerRequester for GitHubClient {
    async fn request_reviewers(
        &self,
        repo: &RepoRef,
        number: u64,
        reviewers: &[String],
    ) -> Result<()> {
        pulls::request_reviewers(&self.octocrab, repo, number, reviewers).await
    }
}
