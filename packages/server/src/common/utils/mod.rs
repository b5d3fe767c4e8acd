pub mod geocoding;
pub mod slack;

pub use geocoding::*;
pub use slack::*;
