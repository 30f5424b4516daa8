use serde::{Deserialize, Serialize};

/// Snapshot of an open pull request, taken once per run.
///
/// The workflow owns this value for the duration of a run; nothing refreshes
/// it mid-run, so every readiness check sees the same data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Login of the author. `None` when the account was deleted (ghost user).
    pub author: Option<String>,
    #[serde(default)]
    pub is_draft: bool,
    pub url: String,
    /// Name of the head branch (`head.ref` in the REST API).
    #[serde(default)]
    pub head_ref: String,
}

impl PullRequest {
    /// A PR is ready for review iff it is not a draft.
    pub fn is_ready_to_review(&self) -> bool {
        !self.is_draft
    }

    /// Author login, or the empty string when unknown.
    pub fn author_login(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}

/// Strip a `refs/heads/` prefix so that both `GITHUB_REF`-style and bare
/// branch names match `head.ref`.
pub fn normalize_head_ref(head_ref: &str) -> &str {
    let trimmed = head_ref.trim();
    trimmed.strip_prefix("refs/heads/").unwrap_or(trimmed)
}
