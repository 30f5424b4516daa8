use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("empty username in reviewer entry \"{entry}\"")]
    EmptyUsername { entry: String },
    #[error("group {group} contains an empty username")]
    EmptyGroupMember { group: String },
    #[error("empty contact handle in reviewer entry \"{entry}\"")]
    EmptyContact { entry: String },
    #[error("group {group} lists \"{username}\" more than once")]
    DuplicateUsername { group: String, username: String },
    #[error("notifications are enabled but no webhook URL is configured")]
    MissingWebhookUrl,
}

// ---------------------------------------------------------------------------
// Reviewer entries
// ---------------------------------------------------------------------------

/// Raw TOML shape of a reviewer: either `"user"` / `"user:contact"` or a table.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Spec(String),
    Table {
        username: String,
        #[serde(default)]
        contact: Option<String>,
    },
}

/// One candidate reviewer: a source-control username plus an optional
/// chat contact handle used when mentioning them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct ReviewerEntry {
    pub username: String,
    pub contact: Option<String>,
}

impl ReviewerEntry {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            contact: None,
        }
    }

    pub fn with_contact(username: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            contact: Some(contact.into()),
        }
    }

    /// Parse the compact `username[:contact]` form.
    ///
    /// Only the first `:` separates the two fields, so contact handles may
    /// themselves contain colons.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either side of the separator is empty.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let (username, contact) = match s.split_once(':') {
            Some((user, contact)) => (user.trim(), Some(contact.trim())),
            None => (s, None),
        };
        Self::build(username, contact, s)
    }

    fn build(username: &str, contact: Option<&str>, entry: &str) -> Result<Self, ConfigError> {
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername {
                entry: entry.to_owned(),
            });
        }
        if contact.is_some_and(str::is_empty) {
            return Err(ConfigError::EmptyContact {
                entry: entry.to_owned(),
            });
        }
        Ok(Self {
            username: username.to_owned(),
            contact: contact.map(str::to_owned),
        })
    }
}

impl TryFrom<RawEntry> for ReviewerEntry {
    type Error = ConfigError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        match raw {
            RawEntry::Spec(s) => Self::parse(&s),
            RawEntry::Table { username, contact } => {
                let entry = match &contact {
                    Some(c) => format!("{username}:{c}"),
                    None => username.clone(),
                };
                Self::build(username.trim(), contact.as_deref().map(str::trim), &entry)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// A pool of candidate reviewers and how many to draw from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewerGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub usernames: Vec<ReviewerEntry>,
    /// Number of reviewers drawn when the author is outside this group.
    #[serde(default)]
    pub reviewers: u32,
    /// Number drawn instead when the author belongs to this group.
    #[serde(default)]
    pub internal_reviewers: Option<u32>,
}

impl ReviewerGroup {
    /// Label used in logs and errors: the name, or the 1-based position.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("\"{name}\""),
            None => format!("#{}", index + 1),
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.usernames.iter().any(|e| e.username == username)
    }
}

// ---------------------------------------------------------------------------
// Notification / GitHub settings
// ---------------------------------------------------------------------------

/// Payload shape expected by the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookFlavor {
    /// `{"content": "..."}`
    #[default]
    Discord,
    /// `{"text": "..."}`
    Slack,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub webhook_url: Option<String>,
    pub flavor: WebhookFlavor,
}

impl NotificationConfig {
    /// The webhook URL to post to, or `None` when notifications are disabled.
    ///
    /// A non-empty `override_url` (command line or environment) takes
    /// precedence over the configured one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingWebhookUrl` if notifications are enabled
    /// and neither source provides a URL.
    pub fn resolve_webhook_url<'a>(
        &'a self,
        override_url: Option<&'a str>,
    ) -> Result<Option<&'a str>, ConfigError> {
        if !self.enabled {
            return Ok(None);
        }
        override_url
            .filter(|url| !url.is_empty())
            .or_else(|| self.webhook_url.as_deref().filter(|url| !url.is_empty()))
            .map(Some)
            .ok_or(ConfigError::MissingWebhookUrl)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webhook_url: None,
            flavor: WebhookFlavor::Discord,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub host: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reviewer groups, in draw order.
    pub groups: Vec<ReviewerGroup>,
    pub notification: NotificationConfig,
    pub github: GitHubConfig,
}

impl AppConfig {
    /// Reject configurations that selection cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found, scanning groups in order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (idx, group) in self.groups.iter().enumerate() {
            let mut seen = std::collections::HashSet::new();
            for entry in &group.usernames {
                if entry.username.is_empty() {
                    return Err(ConfigError::EmptyGroupMember {
                        group: group.label(idx),
                    });
                }
                if !seen.insert(entry.username.as_str()) {
                    return Err(ConfigError::DuplicateUsername {
                        group: group.label(idx),
                        username: entry.username.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Map every configured username to its contact handle.
    ///
    /// A username may appear in several groups; the first entry carrying a
    /// contact handle wins.
    pub fn contact_book(&self) -> HashMap<String, String> {
        let mut book = HashMap::new();
        for entry in self.groups.iter().flat_map(|g| &g.usernames) {
            if let Some(contact) = &entry.contact {
                book.entry(entry.username.clone())
                    .or_insert_with(|| contact.clone());
            }
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_username() {
        let e = ReviewerEntry::parse("alice").unwrap();
        assert_eq!(e, ReviewerEntry::new("alice"));
    }

    #[test]
    fn parse_username_with_contact() {
        let e = ReviewerEntry::parse("alice:U024BE7LH").unwrap();
        assert_eq!(e, ReviewerEntry::with_contact("alice", "U024BE7LH"));
    }

    #[test]
    fn only_first_colon_splits() {
        let e = ReviewerEntry::parse("alice:team:lead").unwrap();
        assert_eq!(e.contact.as_deref(), Some("team:lead"));
    }

    #[test]
    fn empty_sides_are_rejected() {
        assert!(matches!(
            ReviewerEntry::parse(":U1"),
            Err(ConfigError::EmptyUsername { .. })
        ));
        assert!(matches!(
            ReviewerEntry::parse("alice:"),
            Err(ConfigError::EmptyContact { .. })
        ));
    }

    #[test]
    fn duplicate_usernames_in_group_fail_validation() {
        let config = AppConfig {
            groups: vec![ReviewerGroup {
                name: Some("core".into()),
                usernames: vec![
                    ReviewerEntry::new("alice"),
                    ReviewerEntry::with_contact("alice", "U1"),
                ],
                reviewers: 1,
                internal_reviewers: None,
            }],
            ..AppConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateUsername {
                group: "\"core\"".into(),
                username: "alice".into(),
            })
        );
    }

    #[test]
    fn same_username_across_groups_is_allowed() {
        let group = ReviewerGroup {
            usernames: vec![ReviewerEntry::new("alice")],
            reviewers: 1,
            ..ReviewerGroup::default()
        };
        let config = AppConfig {
            groups: vec![group.clone(), group],
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn contact_book_first_contact_wins() {
        let config = AppConfig {
            groups: vec![
                ReviewerGroup {
                    usernames: vec![
                        ReviewerEntry::new("bob"),
                        ReviewerEntry::with_contact("alice", "U1"),
                    ],
                    ..ReviewerGroup::default()
                },
                ReviewerGroup {
                    usernames: vec![
                        ReviewerEntry::with_contact("alice", "U2"),
                        ReviewerEntry::with_contact("bob", "U3"),
                    ],
                    ..ReviewerGroup::default()
                },
            ],
            ..AppConfig::default()
        };
        let book = config.contact_book();
        assert_eq!(book.get("alice").map(String::as_str), Some("U1"));
        assert_eq!(book.get("bob").map(String::as_str), Some("U3"));
    }

    #[test]
    fn empty_member_error_names_the_group() {
        let config = AppConfig {
            groups: vec![
                ReviewerGroup {
                    usernames: vec![ReviewerEntry::new("alice")],
                    ..ReviewerGroup::default()
                },
                ReviewerGroup {
                    usernames: vec![ReviewerEntry::new("bob"), ReviewerEntry::new("")],
                    ..ReviewerGroup::default()
                },
            ],
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err, ConfigError::EmptyGroupMember { group: "#2".into() });
        assert_eq!(err.to_string(), "group #2 contains an empty username");
    }

    #[test]
    fn contains_matches_usernames_not_contacts() {
        let g = ReviewerGroup {
            usernames: vec![ReviewerEntry::with_contact("alice", "U1")],
            ..ReviewerGroup::default()
        };
        assert!(g.contains("alice"));
        assert!(!g.contains("U1"));
        assert!(!g.contains(""));
    }

    #[test]
    fn group_label_falls_back_to_position() {
        let g = ReviewerGroup::default();
        assert_eq!(g.label(0), "#1");
    }
}
