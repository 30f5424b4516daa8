// github module — REST adapters for pull request lookup and review requests

pub mod auth;
pub mod client;
mod pulls;

pub use client::GitHubClient;
