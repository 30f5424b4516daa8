//! End-to-end review assignment for a single pull request.
//!
//! ```text
//! Start ─► PrFetched ─► ReadinessChecked ─► Selected ─► Assigned+Notified ─► Done
//!    │                        │                 │
//!    └─ NotFound (error)      └─ Skipped        └─ Skipped (nobody selected)
//! ```
//!
//! Collaborators are traits so the sequence can run against GitHub and a
//! chat webhook in production and against in-memory fakes in tests.

use std::collections::HashMap;

use anyhow::Result;
use rand::Rng;
use thiserror::Error;

use crate::config::types::ReviewerGroup;
use crate::notify::render_message;
use crate::selection::{SelectionError, select_reviewers};
use crate::types::{PullRequest, RepoRef, normalize_head_ref};

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Lists the open pull requests of a repository.
pub trait PullRequestSource {
    fn list_open_pull_requests(
        &self,
        repo: &RepoRef,
    ) -> impl Future<Output = Result<Vec<PullRequest>>>;
}

/// Adds requested reviewers to a pull request.
pub trait ReviewerRequester {
    fn request_reviewers(
        &self,
        repo: &RepoRef,
        number: u64,
        reviewers: &[String],
    ) -> impl Future<Output = Result<()>>;
}

/// Posts a message to a chat channel.
pub trait ChatNotifier {
    fn send_message(&self, content: &str) -> impl Future<Output = Result<()>>;
}

/// A missing notifier means notifications are disabled.
impl<N: ChatNotifier> ChatNotifier for Option<N> {
    async fn send_message(&self, content: &str) -> Result<()> {
        match self {
            Some(notifier) => notifier.send_message(content).await,
            None => {
                tracing::debug!("notifications disabled, not sending chat message");
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The PR is a draft.
    Draft,
    /// No group produced a reviewer.
    NoReviewers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped { number: u64, reason: SkipReason },
    /// Reviewers were selected but no side effects were performed.
    DryRun { number: u64, reviewers: Vec<String> },
    Assigned { number: u64, reviewers: Vec<String> },
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("no open pull request in {repo} has head ref \"{head_ref}\"")]
    NotFound { repo: String, head_ref: String },
    #[error("fetching open pull requests for {repo}")]
    Fetch {
        repo: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("selecting reviewers for group {group_index}")]
    Selection {
        group_index: usize,
        #[source]
        source: SelectionError,
    },
    #[error("{}", effects_message(.request, .notify))]
    Effects {
        reviewers: Vec<String>,
        request: Option<anyhow::Error>,
        notify: Option<anyhow::Error>,
    },
}

fn effects_message(request: &Option<anyhow::Error>, notify: &Option<anyhow::Error>) -> String {
    let parts: Vec<String> = [("requesting reviewers", request), ("notifying chat", notify)]
        .into_iter()
        .filter_map(|(what, err)| err.as_ref().map(|e| format!("{what}: {e:#}")))
        .collect();
    format!("assignment incomplete ({})", parts.join("; "))
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// Find the open PR whose head branch is `head_ref`.
pub async fn fetch_pull_request<S>(
    source: &S,
    repo: &RepoRef,
    head_ref: &str,
) -> Result<PullRequest, WorkflowError>
where
    S: PullRequestSource,
{
    let head_ref = normalize_head_ref(head_ref);
    let prs = source
        .list_open_pull_requests(repo)
        .await
        .map_err(|source| WorkflowError::Fetch {
            repo: repo.full_name(),
            source,
        })?;

    prs.into_iter()
        .find(|pr| pr.head_ref == head_ref)
        .ok_or_else(|| WorkflowError::NotFound {
            repo: repo.full_name(),
            head_ref: head_ref.to_owned(),
        })
}

/// One review assignment run. Consumed by [`ReviewAssignment::run`], so a
/// value drives at most one PR through the state machine.
pub struct ReviewAssignment<'a, S, Q, N> {
    pub groups: &'a [ReviewerGroup],
    /// Username → chat contact handle, used for mentions.
    pub contacts: &'a HashMap<String, String>,
    pub source: &'a S,
    pub requester: &'a Q,
    pub notifier: &'a N,
    pub dry_run: bool,
}

impl<S, Q, N> ReviewAssignment<'_, S, Q, N>
where
    S: PullRequestSource,
    Q: ReviewerRequester,
    N: ChatNotifier,
{
    pub async fn run<R>(
        self,
        repo: &RepoRef,
        head_ref: &str,
        rng: &mut R,
    ) -> Result<Outcome, WorkflowError>
    where
        R: Rng + ?Sized,
    {
        let pr = fetch_pull_request(self.source, repo, head_ref).await?;
        tracing::info!(number = pr.number, title = %pr.title, "found pull request");

        if !pr.is_ready_to_review() {
            tracing::info!(number = pr.number, "pull request is a draft, skipping");
            return Ok(Outcome::Skipped {
                number: pr.number,
                reason: SkipReason::Draft,
            });
        }

        let selection = select_reviewers(self.groups, pr.author_login(), rng);
        // A failure in the first group means no group was reached at all.
        if let Some(failure) = selection.failure {
            if failure.group_index == 0 {
                return Err(WorkflowError::Selection {
                    group_index: failure.group_index,
                    source: failure.error,
                });
            }
            tracing::warn!(
                group_index = failure.group_index,
                error = %failure.error,
                kept = selection.reviewers.len(),
                "reviewer selection stopped early, continuing with partial result"
            );
        }

        let reviewers: Vec<String> = selection
            .reviewers
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect();
        if reviewers.is_empty() {
            tracing::info!(number = pr.number, "no reviewers selected, skipping");
            return Ok(Outcome::Skipped {
                number: pr.number,
                reason: SkipReason::NoReviewers,
            });
        }
        tracing::info!(number = pr.number, reviewers = ?reviewers, "selected reviewers");

        if self.dry_run {
            return Ok(Outcome::DryRun {
                number: pr.number,
                reviewers,
            });
        }

        self.assign_and_notify(repo, &pr, reviewers).await
    }

    /// Request the reviewers and post the chat message. Both are attempted
    /// even if the first fails; already-made requests are not rolled back.
    async fn assign_and_notify(
        &self,
        repo: &RepoRef,
        pr: &PullRequest,
        reviewers: Vec<String>,
    ) -> Result<Outcome, WorkflowError> {
        let request = self
            .requester
            .request_reviewers(repo, pr.number, &reviewers)
            .await
            .err();
        if let Some(err) = &request {
            tracing::error!(
                number = pr.number,
                error = %format!("{err:#}"),
                "requesting reviewers failed"
            );
        }

        let content = render_message(&reviewers, self.contacts, pr);
        let notify = self.notifier.send_message(&content).await.err();
        if let Some(err) = &notify {
            tracing::error!(
                number = pr.number,
                error = %format!("{err:#}"),
                "chat notification failed"
            );
        }

        if request.is_some() || notify.is_some() {
            return Err(WorkflowError::Effects {
                reviewers,
                request,
                notify,
            });
        }

        tracing::info!(number = pr.number, "reviewers assigned and notified");
        Ok(Outcome::Assigned {
            number: pr.number,
            reviewers,
        })
    }
}
