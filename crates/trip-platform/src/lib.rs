//! Browser adapters for the trip planner.
//!
//! Implements the trip-core ports on top of `fetch()` (gloo-net) and
//! IndexedDB (web-sys). Response-body parsing is kept in plain functions so
//! it can be tested off the browser.

pub mod geocode;
pub mod llm;
pub mod places;
pub mod storage;
pub mod weather;


/// Route `log` output to the browser console.
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("trip-planner v{} logging ready", env!("CARGO_PKG_VERSION"));
}
