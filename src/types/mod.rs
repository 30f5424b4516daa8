// Shared domain types — used by the selection core, the workflow and the
// GitHub/chat adapters. None of those layers depends on another for types.

pub mod common;
pub mod pr;

pub use common::*;
pub use pr::*;
