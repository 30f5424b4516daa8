//! Reviewer selection: the pure core of the tool.
//!
//! - [`policy`] decides, per group, the candidate pool and how many to draw.
//! - [`sampler`] draws distinct candidates uniformly at random.
//! - [`selector`] runs both across every group, in declaration order, with a
//!   shared exclusion set so nobody is picked twice and the author never is.
//!
//! Nothing here performs I/O or logs; callers get structured results back.

pub mod policy;
pub mod sampler;
pub mod selector;

use thiserror::Error;

pub use policy::{GroupDraw, resolve_group};
pub use sampler::sample;
pub use selector::{Selection, select_reviewers};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("group {group} contains an empty username")]
    EmptyUsername { group: String },
}
