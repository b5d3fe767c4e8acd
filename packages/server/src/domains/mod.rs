// Business domains
pub mod listings;
pub mod locations;
pub mod moderation;
