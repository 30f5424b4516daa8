use std::sync::Arc;

use anyhow::{Context, Result};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};

use crate::types::{PullRequest, RepoRef};

/// GitHub's maximum page size for the pulls endpoint.
const PER_PAGE: usize = 100;

// ---------------------------------------------------------------------------
// Raw API response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawPullRequest {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    user: Option<RawUser>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    html_url: String,
    head: RawHead,
}

#[derive(Deserialize)]
struct RawUser {
    login: String,
}

#[derive(Deserialize)]
struct RawHead {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Serialize)]
struct ListParams {
    state: &'static str,
    per_page: usize,
    page: u32,
}

fn into_domain(raw: RawPullRequest) -> PullRequest {
    PullRequest {
        number: raw.number,
        title: raw.title,
        author: raw.user.map(|u| u.login).filter(|login| !login.is_empty()),
        is_draft: raw.draft,
        url: raw.html_url,
        head_ref: raw.head.ref_name,
    }
}

// ---------------------------------------------------------------------------
// API calls
// ---------------------------------------------------------------------------

/// List every open pull request of `repo`, following pagination.
pub async fn list_open(octocrab: &Arc<Octocrab>, repo: &RepoRef) -> Result<Vec<PullRequest>> {
    let route = format!("/repos/{}/{}/pulls", repo.owner, repo.name);
    let mut prs = Vec::new();
    let mut page = 1;
    loop {
        let params = ListParams {
            state: "open",
            per_page: PER_PAGE,
            page,
        };
        let batch: Vec<RawPullRequest> = octocrab
            .get(&route, Some(&params))
            .await
            .with_context(|| format!("listing open pull requests (page {page})"))?;
        let len = batch.len();
        prs.extend(batch.into_iter().map(into_domain));
        if len < PER_PAGE {
            break;
        }
        page += 1;
    }
    tracing::debug!(repo = %repo, count = prs.len(), "fetched open pull requests");
    Ok(prs)
}

/// Request reviews from `reviewers` on pull request `number`.
pub async fn request_reviewers(
    octocrab: &Arc<Octocrab>,
    repo: &RepoRef,
    number: u64,
    reviewers: &[String],
) -> Result<()> {
    let route = format!(
        "/repos/{}/{}/pulls/{number}/requested_reviewers",
        repo.owner, repo.name
    );
    let payload = serde_json::json!({ "reviewers": reviewers });
    let _: serde_json::Value = octocrab
        .post(route, Some(&payload))
        .await
        .context("requesting reviewers")?;
    Ok(())
}
