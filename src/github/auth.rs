use std::process::Command;

use anyhow::{Context, Result, bail};

/// Resolve a GitHub auth token for the given host.
///
/// Priority:
/// 1. `GITHUB_TOKEN` environment variable (set by GitHub Actions)
/// 2. `GH_TOKEN` environment variable
/// 3. `gh auth token --hostname {host}` (gh CLI, for local runs)
pub fn resolve_token(host: &str) -> Result<String> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            tracing::debug!(source = var, "using GitHub token from environment");
            return Ok(token);
        }
    }

    if let Ok(token) = token_from_gh_cli(host) {
        tracing::debug!(host, "using GitHub token from gh CLI");
        return Ok(token);
    }

    bail!(
        "no GitHub token found for host \"{host}\". \
         Set GITHUB_TOKEN / GH_TOKEN or run `gh auth login`."
    )
}

fn token_from_gh_cli(host: &str) -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token", "--hostname", host])
        .output()
        .context("failed to run `gh auth token`")?;

    if !output.status.success() {
        bail!("gh auth token exited with non-zero status");
    }

    let token = String::from_utf8(output.stdout)
        .context("gh auth token produced non-UTF-8 output")?
        .trim()
        .to_owned();

    if token.is_empty() {
        bail!("gh auth token returned empty string");
    }

    Ok(token)
}
