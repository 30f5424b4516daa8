use crate::config::types::ReviewerGroup;

use super::SelectionError;

/// What a single group contributes to a selection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDraw<'a> {
    /// Candidate usernames, in config order.
    pub pool: Vec<&'a str>,
    /// How many reviewers to draw from `pool`. Zero means the group is skipped.
    pub count: usize,
    /// Whether `internal_reviewers` was applied because the author is a member.
    pub internal: bool,
}

/// Resolve the candidate pool and draw count of `group` for a PR by `author`.
///
/// `author` may be empty when the PR author could not be determined; an empty
/// author never matches a pool member, so the external count applies.
///
/// # Errors
///
/// Returns `SelectionError::EmptyUsername` if the group holds an empty
/// username, which the config loader rejects but hand-built groups may carry.
pub fn resolve_group<'a>(
    group: &'a ReviewerGroup,
    index: usize,
    author: &str,
) -> Result<GroupDraw<'a>, SelectionError> {
    let pool: Vec<&str> = group
        .usernames
        .iter()
        .map(|entry| entry.username.as_str())
        .collect();

    if pool.iter().any(|u| u.is_empty()) {
        return Err(SelectionError::EmptyUsername {
            group: group.label(index),
        });
    }

    let author_is_member = !author.is_empty() && group.contains(author);
    let (count, internal) = match group.internal_reviewers {
        Some(internal) if author_is_member => (internal, true),
        _ => (group.reviewers, false),
    };

    Ok(GroupDraw {
        pool,
        count: count as usize,
        internal,
    })
}
