pub mod message;
pub mod event;
pub mod intake;
pub mod itinerary;
pub mod lookup;
pub mod config;
pub mod error;
pub mod trip;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, TripError};
pub type Result<T> = std::result::Result<T, TripError>;
