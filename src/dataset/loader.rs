//! CSV loader for trip records.
//!
//! Columns are matched by header name, so the unnamed index column and any
//! extra columns in the exported file are ignored.

use crate::dataset::types::{Season, TripDataset, TripRecord};
use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use flate2::read::MultiGzDecoder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// A row as it appears in the CSV, before validation.
#[derive(Debug, Deserialize)]
struct RawTrip {
    date: Option<String>,
    start_station_name: Option<String>,
    season: Option<String>,
    bike_rides_daily: Option<String>,
    #[serde(rename = "avgTemp")]
    avg_temp: Option<String>,
}

impl RawTrip {
    fn into_record(self, record: u64) -> Result<TripRecord> {
        let date = required(self.date, "date", record)?;
        let date = parse_date(&date).ok_or_else(|| {
            Error::malformed(record, format!("unparsable date '{date}'"))
        })?;

        let start_station_name = required(self.start_station_name, "start_station_name", record)?;

        let season = required(self.season, "season", record)?
            .parse::<Season>()
            .map_err(|reason| Error::malformed(record, reason))?;

        let bike_rides_daily = parse_number(self.bike_rides_daily, "bike_rides_daily", record)?;
        let avg_temp = parse_number(self.avg_temp, "avgTemp", record)?;

        Ok(TripRecord {
            date,
            start_station_name,
            season,
            bike_rides_daily,
            avg_temp,
        })
    }
}

fn required(value: Option<String>, field: &str, record: u64) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::malformed(record, format!("missing {field}"))),
    }
}

fn parse_number(value: Option<String>, field: &str, record: u64) -> Result<f64> {
    let raw = required(value, field, record)?;
    raw.parse::<f64>()
        .map_err(|_| Error::malformed(record, format!("{field} is not a number: '{raw}'")))
}

/// Accepts a bare date or a full timestamp; the time part is dropped.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

impl TripDataset {
    /// Parses CSV trip records from `reader`. The first row must be a header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] for the first row that is missing a
    /// required field or holds an unparsable value, and [`Error::Io`] if the
    /// underlying reader fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();

        for (idx, result) in rdr.deserialize::<RawTrip>().enumerate() {
            let record = idx as u64 + 1;
            let raw = result.map_err(|e| {
                if e.is_io_error() {
                    match e.into_kind() {
                        csv::ErrorKind::Io(io) => Error::Io(io),
                        other => Error::malformed(record, format!("{other:?}")),
                    }
                } else {
                    Error::malformed(record, e.to_string())
                }
            })?;
            records.push(raw.into_record(record)?);
        }

        let dataset = TripDataset::new(records);
        info!(
            rows = dataset.len(),
            seasons = ?dataset.seasons(),
            "Trip dataset loaded"
        );
        Ok(dataset)
    }

    /// Parses an in-memory CSV body, gunzipping it first when `gzip` is set.
    pub fn from_bytes(bytes: &[u8], gzip: bool) -> Result<Self> {
        debug!(bytes = bytes.len(), gzip, "Parsing trip CSV from memory");
        if gzip {
            Self::from_reader(MultiGzDecoder::new(bytes))
        } else {
            Self::from_reader(bytes)
        }
    }

    /// Loads a CSV file from disk. Paths ending in `.gz` are decompressed.
    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);

        if is_gzip_path(path) {
            Self::from_reader(MultiGzDecoder::new(file))
        } else {
            Self::from_reader(file)
        }
    }
}

/// Returns `true` when the source name ends in `.gz`.
pub fn is_gzip_path(path: impl AsRef<Path>) -> bool {
    path.as_ref().extension().and_then(|e| e.to_str()) == Some("gz")
}
