pub mod data;
pub mod gateway;

pub use data::InteractionPayload;
pub use gateway::{handle_callback, ModerationOutcome};
