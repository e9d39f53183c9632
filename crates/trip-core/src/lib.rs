//! Trip planner core.
//!
//! Wizard → [`session::ItinerarySession::generate`] → prompt → model →
//! [`extract::extract_json`] → [`normalize::normalize`] → stored itinerary.
//! Edits and suggestions repeat the same cycle against the stored state.

pub mod event_bus;
pub mod extract;
pub mod intent;
pub mod normalize;
pub mod ports;
pub mod prompts;
pub mod session;
pub mod store;
pub mod wizard;
