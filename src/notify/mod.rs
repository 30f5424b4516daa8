// notify module — chat message rendering and webhook delivery

mod message;
pub mod webhook;

pub use message::{mention, render_message};
pub use webhook::WebhookNotifier;
