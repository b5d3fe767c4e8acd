pub mod submission;

pub use submission::{ListingSubmission, ValidationErrors};
