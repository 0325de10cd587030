//! Output formatting and persistence for reports.
//!
//! Supports log-line pretty printing, JSON serialization, and CSV export.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

use crate::analyzers::types::{AggregatedGroup, DailyPoint, StationReport, WeatherReport};

/// Logs the ranking, one line per group.
pub fn print_station_report(report: &StationReport) {
    info!(
        seasons = ?report.seasons,
        group_by = %report.group_by,
        total_rides = %report.total_rides_label,
        "Total bike rides"
    );
    for (rank, group) in report.top.iter().enumerate() {
        info!(rank = rank + 1, key = %group.key, trips = group.trip_count, "Top group");
    }
}

/// Logs the weather series summary and each day.
pub fn print_weather_report(report: &WeatherReport) {
    info!(
        seasons = ?report.seasons,
        days = report.days.len(),
        correlation = ?report.rides_temperature_correlation,
        "Daily bike rides and temperature"
    );
    for day in &report.days {
        debug!(date = %day.date, rides = day.bike_rides_daily, avg_temp = day.avg_temp, "Day");
    }
}

/// Serializes any report as pretty-printed JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

const GROUP_HEADERS: [&str; 2] = ["key", "trip_count"];
const SERIES_HEADERS: [&str; 3] = ["date", "bike_rides_daily", "avg_temp"];

/// Writes rows as CSV with a header line. `headers` must match the field
/// names of `T`; it is only written directly when there are no rows.
fn write_rows<W: Write, T: Serialize>(writer: W, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    if rows.is_empty() {
        writer.write_record(headers)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `key,trip_count` rows to `writer`.
pub fn write_groups_csv<W: Write>(writer: W, groups: &[AggregatedGroup]) -> Result<()> {
    debug!(rows = groups.len(), "Writing group CSV");
    write_rows(writer, &GROUP_HEADERS, groups)
}

/// Writes `date,bike_rides_daily,avg_temp` rows to `writer`.
pub fn write_series_csv<W: Write>(writer: W, points: &[DailyPoint]) -> Result<()> {
    debug!(rows = points.len(), "Writing daily series CSV");
    write_rows(writer, &SERIES_HEADERS, points)
}
