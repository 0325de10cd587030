//! Trip dataset: record types and the CSV loader.
//!
//! A [`TripDataset`] is loaded once by the caller and handed to the
//! aggregation code by reference. Nothing in the crate mutates it after load.

pub mod loader;
pub mod types;

pub use types::{Season, TripDataset, TripRecord};
