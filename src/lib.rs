//! Season-filtered trip ranking over bike-share trip records.
//!
//! Load a [`TripDataset`] once, then pass it to the functions in
//! [`analyzers`] to filter by season, count trips per key and rank the
//! busiest groups.

pub mod analyzers;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod output;

pub use analyzers::aggregate::{aggregate_counts, filter_by_season, top_n};
pub use analyzers::types::{AggregatedGroup, GroupBy};
pub use dataset::{Season, TripDataset, TripRecord};
pub use error::{Error, Result};
