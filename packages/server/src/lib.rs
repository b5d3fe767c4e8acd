// Open For Takeout - Directory API Core
//
// This crate provides the backend API for the takeout directory: listing
// submission, proximity search, and Slack-moderated publication.
// Architecture follows domain-driven design; SQL lives in domains/*/models.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
