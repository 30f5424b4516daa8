//! Fallbacks for running outside CI: infer the repository and the branch
//! from the local checkout when they are not passed explicitly.

use std::path::Path;
use std::process::Command;

use crate::types::RepoRef;

/// Detect `owner/repo` from the git remote of the directory at `path`.
///
/// Tries the `origin` remote first, falls back to the first listed remote.
pub fn detect_repo(path: &Path) -> Option<RepoRef> {
    let url = git_output(path, &["remote", "get-url", "origin"]).or_else(|| {
        let remotes = git_output(path, &["remote"])?;
        let first = remotes.lines().next()?.trim().to_owned();
        git_output(path, &["remote", "get-url", &first])
    })?;
    parse_remote_url(&url)
}

/// Name of the branch checked out at `path`. `None` on a detached HEAD.
pub fn current_branch(path: &Path) -> Option<String> {
    let branch = git_output(path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    (branch != "HEAD").then_some(branch)
}

/// Run `git <args>` in `path` and return trimmed stdout, if non-empty.
fn git_output(path: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let out = String::from_utf8_lossy(&output.stdout).trim().to_owned();
    if out.is_empty() { None } else { Some(out) }
}

/// Parse `owner/repo` from an SSH or HTTPS remote URL.
///
/// Handles `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `https://host/owner/repo.git`.
fn parse_remote_url(url: &str) -> Option<RepoRef> {
    let slug = if let Some(rest) = url.strip_prefix("git@") {
        rest.split_once(':')?.1
    } else if let Some((_, after_scheme)) = url.split_once("://") {
        // Skip host (and any user@): everything after the first '/'.
        after_scheme.split_once('/')?.1
    } else {
        return None;
    };

    let slug = slug.trim_end_matches('/');
    let slug = slug.strip_suffix(".git").unwrap_or(slug);
    RepoRef::from_full_name(slug)
}
