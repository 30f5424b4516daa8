// config module — reviewer groups and notification settings

pub mod loader;
pub mod types;

pub use types::{
    AppConfig, ConfigError, GitHubConfig, NotificationConfig, ReviewerEntry, ReviewerGroup,
    WebhookFlavor,
};
