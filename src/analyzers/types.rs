//! Data types produced by the aggregation pipeline.

use crate::dataset::{Season, TripRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Trip count for one distinct key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedGroup {
    pub key: String,
    pub trip_count: u64,
}

/// Column trips are grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    Station,
    Season,
    Date,
}

impl GroupBy {
    /// Extracts the grouping key from a record.
    pub fn key<'a>(&self, record: &'a TripRecord) -> Cow<'a, str> {
        match self {
            GroupBy::Station => Cow::Borrowed(record.start_station_name.as_str()),
            GroupBy::Season => Cow::Borrowed(record.season.label()),
            GroupBy::Date => Cow::Owned(record.date.format("%Y-%m-%d").to_string()),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupBy::Station => "station",
            GroupBy::Season => "season",
            GroupBy::Date => "date",
        })
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "station" | "start_station_name" => Ok(GroupBy::Station),
            "season" => Ok(GroupBy::Season),
            "date" => Ok(GroupBy::Date),
            other => Err(format!(
                "unknown grouping '{other}' (expected station, season or date)"
            )),
        }
    }
}

/// The "most popular stations" view: filter, headline metric and ranking.
#[derive(Debug, Serialize)]
pub struct StationReport {
    pub seasons: Vec<Season>,
    pub group_by: GroupBy,
    pub total_rides: u64,
    pub total_rides_label: String,
    pub top: Vec<AggregatedGroup>,
}

/// Rides and temperature for a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub bike_rides_daily: f64,
    pub avg_temp: f64,
}

/// The "weather and bike usage" view.
#[derive(Debug, Serialize)]
pub struct WeatherReport {
    pub seasons: Vec<Season>,
    pub days: Vec<DailyPoint>,
    pub rides_temperature_correlation: Option<f64>,
}
