use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// File names probed in each directory, in order.
const LOCAL_CONFIG_NAMES: &[&str] = &[".github/reviewers.toml", ".reviewers.toml"];

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "REVIEWER_ASSIGN_CONFIG";

/// Discover, load and validate the reviewer config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$REVIEWER_ASSIGN_CONFIG` environment variable
/// 3. `.github/reviewers.toml` or `.reviewers.toml`, walking up from the
///    current directory to the Git repository root
///
/// Unlike a dashboard, this tool cannot do anything useful without groups, so
/// a missing config file is an error rather than a default.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("reading current directory")?;
            find_config(&cwd).with_context(|| {
                format!(
                    "no reviewer config found; pass --config, set ${CONFIG_ENV}, \
                     or add {} to the repository",
                    LOCAL_CONFIG_NAMES[0]
                )
            })?
        }
    };
    load_from_path(&path)
}

/// Read, parse and validate a config file.
pub fn load_from_path(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("loading config from {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        groups = config.groups.len(),
        "loaded reviewer config"
    );
    Ok(config)
}

/// Parse and validate config from a TOML string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).context("parsing TOML")?;
    config.validate()?;
    Ok(config)
}

fn find_config(start: &Path) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }
    find_repo_local_config(start)
}

/// Walk up from `start` looking for a config file, stopping at the directory
/// that contains `.git`.
pub(crate) fn find_repo_local_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        for name in LOCAL_CONFIG_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if dir.join(".git").exists() {
            // Reached git root without finding config.
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_config_in_parent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(".git")).unwrap();
        std::fs::create_dir_all(tmp.path().join(".github")).unwrap();
        std::fs::write(tmp.path().join(".github/reviewers.toml"), "").unwrap();
        let nested = tmp.path().join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_repo_local_config(&nested).unwrap();
        assert_eq!(found, tmp.path().join(".github/reviewers.toml"));
    }

    #[test]
    fn prefers_github_dir_over_dotfile() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(".github")).unwrap();
        std::fs::write(tmp.path().join(".github/reviewers.toml"), "").unwrap();
        std::fs::write(tmp.path().join(".reviewers.toml"), "").unwrap();

        let found = find_repo_local_config(tmp.path()).unwrap();
        assert!(found.ends_with(".github/reviewers.toml"));
    }

    #[test]
    fn stops_at_git_root() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".reviewers.toml"), "").unwrap();
        let repo = tmp.path().join("repo");
        std::fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(find_repo_local_config(&repo).is_none());
    }
}
