// HTTP routes
pub mod health;
pub mod restaurants;
pub mod slack;

pub use health::*;
pub use restaurants::*;
pub use slack::*;
