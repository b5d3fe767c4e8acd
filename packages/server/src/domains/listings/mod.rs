pub mod actions;
pub mod data;
pub mod errors;
pub mod messages;
pub mod models;

pub use actions::{approve_listing, submit_listing};
pub use data::{ListingSubmission, ValidationErrors};
pub use errors::ListingError;
pub use messages::{approval_confirmation, ModerationRequest, APPROVE_LABEL};

// Re-export models (domain models)
pub use models::Listing;
