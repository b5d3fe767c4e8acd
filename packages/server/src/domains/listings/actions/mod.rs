//! Listing domain actions - business logic functions
//!
//! HTTP routes and the moderation gateway call these; SQL stays in models/.

pub mod approve;
pub mod submit;

pub use approve::approve_listing;
pub use submit::submit_listing;
