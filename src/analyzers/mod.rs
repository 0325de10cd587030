//! Trip aggregation and reporting.
//!
//! This module filters trips by season, counts them per key, ranks the
//! busiest groups, and derives the daily rides/temperature series.

pub mod aggregate;
pub mod report;
pub mod types;
pub mod utility;
