use gh_reviewer_assign::config::loader::{load_from_path, parse_config};
use gh_reviewer_assign::config::{AppConfig, ConfigError, ReviewerEntry, WebhookFlavor};

#[test]
fn parse_minimal_config() {
    let toml = r#"
[[groups]]
usernames = ["alice", "bob"]
reviewers = 1
"#;
    let config = parse_config(toml).unwrap();
    assert_eq!(config.groups.len(), 1);
    assert_eq!(config.groups[0].name, None);
    assert_eq!(config.groups[0].reviewers, 1);
    assert_eq!(config.groups[0].internal_reviewers, None);
    assert_eq!(
        config.groups[0].usernames,
        vec![ReviewerEntry::new("alice"), ReviewerEntry::new("bob")]
    );
}

#[test]
fn parse_contact_handles_in_both_forms() {
    let toml = r#"
[[groups]]
name = "backend"
usernames = ["alice:U01", { username = "bob", contact = "U02" }, { username = "carol" }]
reviewers = 2
internal_reviewers = 1
"#;
    let config = parse_config(toml).unwrap();
    let group = &config.groups[0];
    assert_eq!(group.name.as_deref(), Some("backend"));
    assert_eq!(group.internal_reviewers, Some(1));
    assert_eq!(
        group.usernames,
        vec![
            ReviewerEntry::with_contact("alice", "U01"),
            ReviewerEntry::with_contact("bob", "U02"),
            ReviewerEntry::new("carol"),
        ]
    );
}

#[test]
fn group_order_is_preserved() {
    let toml = r#"
[[groups]]
name = "first"
usernames = ["a"]
reviewers = 1

[[groups]]
name = "second"
usernames = ["b"]
reviewers = 1

[[groups]]
name = "third"
usernames = ["c"]
reviewers = 1
"#;
    let config = parse_config(toml).unwrap();
    let names: Vec<_> = config
        .groups
        .iter()
        .map(|g| g.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn parse_notification_settings() {
    let toml = r#"
[notification]
webhook_url = "https://hooks.slack.com/services/T/B/X"
flavor = "slack"

[github]
host = "github.example.com"
"#;
    let config = parse_config(toml).unwrap();
    assert!(config.notification.enabled);
    assert_eq!(config.notification.flavor, WebhookFlavor::Slack);
    assert_eq!(
        config.notification.webhook_url.as_deref(),
        Some("https://hooks.slack.com/services/T/B/X")
    );
    assert_eq!(config.github.host, "github.example.com");
}

#[test]
fn enabled_notifications_without_url_fail() {
    let config = parse_config("[notification]\nenabled = true\n").unwrap();
    assert_eq!(
        config.notification.resolve_webhook_url(None),
        Err(ConfigError::MissingWebhookUrl)
    );
    assert_eq!(
        config.notification.resolve_webhook_url(Some("")),
        Err(ConfigError::MissingWebhookUrl)
    );
}

#[test]
fn webhook_override_wins_over_config() {
    let config = parse_config(
        r#"
[notification]
webhook_url = "https://chat.example.com/from-config"
"#,
    )
    .unwrap();
    let notification = &config.notification;
    assert_eq!(
        notification.resolve_webhook_url(Some("https://chat.example.com/from-env")),
        Ok(Some("https://chat.example.com/from-env"))
    );
    assert_eq!(
        notification.resolve_webhook_url(None),
        Ok(Some("https://chat.example.com/from-config"))
    );
    assert_eq!(
        notification.resolve_webhook_url(Some("")),
        Ok(Some("https://chat.example.com/from-config"))
    );
}

#[test]
fn disabled_notifications_resolve_to_no_url() {
    let config = parse_config("[notification]\nenabled = false\n").unwrap();
    assert_eq!(config.notification.resolve_webhook_url(None), Ok(None));
    assert_eq!(
        config
            .notification
            .resolve_webhook_url(Some("https://chat.example.com/hook")),
        Ok(None)
    );
}

#[test]
fn default_config_has_sane_defaults() {
    let config = AppConfig::default();
    assert!(config.groups.is_empty());
    assert!(config.notification.enabled);
    assert_eq!(config.notification.flavor, WebhookFlavor::Discord);
    assert_eq!(config.github.host, "github.com");
}

#[test]
fn parse_unknown_keys_ignored() {
    let toml = r#"
unknown_top_level = "should be ignored"

[[groups]]
usernames = ["a"]
reviewers = 1
"#;
    assert!(parse_config(toml).is_ok());
}

#[test]
fn duplicate_username_in_group_fails() {
    let toml = r#"
[[groups]]
name = "ops"
usernames = ["alice", "alice:U01"]
reviewers = 1
"#;
    let err = parse_config(toml).unwrap_err();
    assert!(
        format!("{err:#}").contains("\"ops\" lists \"alice\" more than once"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn empty_username_fails() {
    let toml = r#"
[[groups]]
usernames = [":U01"]
reviewers = 1
"#;
    assert!(parse_config(toml).is_err());
}

#[test]
fn negative_count_fails() {
    let toml = r#"
[[groups]]
usernames = ["a"]
reviewers = -1
"#;
    assert!(parse_config(toml).is_err());
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviewers.toml");
    std::fs::write(
        &path,
        r#"
[[groups]]
usernames = ["alice:U01", "bob"]
reviewers = 1
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    let book = config.contact_book();
    assert_eq!(book.get("alice").map(String::as_str), Some("U01"));
    assert!(!book.contains_key("bob"));
}

#[test]
fn load_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}
