pub mod models;
pub mod resolver;

// Re-export models (domain models)
pub use models::zip_code::{PostgresCoordinateCache, ZipCode};

pub use resolver::GeocodingResolver;
