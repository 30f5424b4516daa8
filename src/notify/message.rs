use std::collections::HashMap;

use crate::types::PullRequest;

/// Mention a reviewer by chat contact handle when known, else by username.
pub fn mention(username: &str, contacts: &HashMap<String, String>) -> String {
    match contacts.get(username) {
        Some(contact) => format!("<@{contact}>"),
        None => format!("@{username}"),
    }
}

/// Build the chat message announcing a review request.
///
/// ```text
/// <@U01> @bob
/// Review requested: Add retries (#7)
/// https://github.com/acme/api/pull/7
/// ```
pub fn render_message(
    reviewers: &[String],
    contacts: &HashMap<String, String>,
    pr: &PullRequest,
) -> String {
    let mentions: Vec<String> = reviewers.iter().map(|r| mention(r, contacts)).collect();
    format!(
        "{}\nReview requested: {} (#{})\n{}",
        mentions.join(" "),
        pr.title,
        pr.number,
        pr.url
    )
}
