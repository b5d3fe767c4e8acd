pub mod listing;

pub use listing::{Listing, NEARBY_RADIUS_METERS};
