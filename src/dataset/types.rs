//! Data types for trip records.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Meteorological season a trip was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            other => Err(format!("unknown season '{other}'")),
        }
    }
}

/// A single bike trip joined with that day's weather.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub date: NaiveDate,
    pub start_station_name: String,
    pub season: Season,
    pub bike_rides_daily: f64,
    #[serde(rename = "avgTemp")]
    pub avg_temp: f64,
}

/// Immutable, load-once set of trip records.
#[derive(Debug, Clone, Default)]
pub struct TripDataset {
    pub(crate) records: Vec<TripRecord>,
}

impl TripDataset {
    pub fn new(records: Vec<TripRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct seasons in order of first appearance.
    pub fn seasons(&self) -> Vec<Season> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.season) {
                seen.push(record.season);
                if seen.len() == Season::ALL.len() {
                    break;
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(station: &str, season: Season) -> TripRecord {
        TripRecord {
            date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            start_station_name: station.to_string(),
            season,
            bike_rides_daily: 100.0,
            avg_temp: 20.0,
        }
    }

    #[test]
    fn test_season_parse_is_case_insensitive() {
        assert_eq!("summer".parse::<Season>().unwrap(), Season::Summer);
        assert_eq!(" WINTER ".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!("Autumn".parse::<Season>().unwrap(), Season::Fall);
        assert!("monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn test_season_display_round_trips_label() {
        for season in Season::ALL {
            assert_eq!(season.to_string().parse::<Season>().unwrap(), season);
        }
    }

    #[test]
    fn test_seasons_in_first_appearance_order() {
        let dataset = TripDataset::new(vec![
            trip("A", Season::Winter),
            trip("B", Season::Summer),
            trip("C", Season::Winter),
            trip("D", Season::Spring),
        ]);

        assert_eq!(
            dataset.seasons(),
            vec![Season::Winter, Season::Summer, Season::Spring]
        );
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = TripDataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.seasons().is_empty());
    }
}
