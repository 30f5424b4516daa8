use std::collections::HashSet;

use rand::Rng;

use crate::config::types::ReviewerGroup;

use super::SelectionError;
use super::policy::resolve_group;
use super::sampler::sample;

/// Outcome of one selection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Picked reviewers, group by group, in draw order. Never contains the
    /// author or the same username twice.
    pub reviewers: Vec<String>,
    /// Set when a group could not be processed. `reviewers` then holds the
    /// picks of the groups before it, and later groups were not attempted.
    pub failure: Option<SelectionFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFailure {
    /// 0-based index of the failing group.
    pub group_index: usize,
    pub error: SelectionError,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }
}

/// Pick reviewers for a PR by `author` across all `groups`, in order.
///
/// The exclusion set starts as `{author}` and grows with every pick, so a
/// person chosen for one group is not eligible in any later group.
pub fn select_reviewers<R>(groups: &[ReviewerGroup], author: &str, rng: &mut R) -> Selection
where
    R: Rng + ?Sized,
{
    let mut excluded: HashSet<String> = HashSet::from([author.to_owned()]);
    let mut selection = Selection::default();

    for (index, group) in groups.iter().enumerate() {
        let draw = match resolve_group(group, index, author) {
            Ok(draw) => draw,
            Err(error) => {
                selection.failure = Some(SelectionFailure {
                    group_index: index,
                    error,
                });
                break;
            }
        };
        if draw.count == 0 {
            continue;
        }

        let picks = sample(&draw.pool, draw.count, &excluded, rng);
        excluded.extend(picks.iter().cloned());
        selection.reviewers.extend(picks);
    }

    selection
}
