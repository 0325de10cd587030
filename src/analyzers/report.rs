use crate::analyzers::aggregate::{aggregate_counts, filter_by_season, top_n};
use crate::analyzers::types::{DailyPoint, GroupBy, StationReport, WeatherReport};
use crate::analyzers::utility::{humanize_count, pearson};
use crate::dataset::{Season, TripDataset, TripRecord};
use crate::error::Result;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Builds the ranking view: trips matching `seasons`, counted per
/// `group_by` key, best `n` groups.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidArgument`] when `n` is zero.
pub fn build_station_report(
    dataset: &TripDataset,
    seasons: &[Season],
    n: usize,
    group_by: GroupBy,
) -> Result<StationReport> {
    let filter: HashSet<Season> = seasons.iter().copied().collect();
    let filtered = filter_by_season(dataset.records(), &filter);
    let total_rides = filtered.len() as u64;

    let counts = aggregate_counts(filtered, |r| group_by.key(r));
    debug!(groups = counts.len(), total_rides, %group_by, "Trips aggregated");

    let top = top_n(&counts, n)?;

    Ok(StationReport {
        seasons: seasons.to_vec(),
        group_by,
        total_rides,
        total_rides_label: humanize_count(total_rides as f64),
        top,
    })
}

/// One point per distinct date, ordered by date.
///
/// Every trip on a given day carries the same daily totals, so the first
/// record seen for a date stands for the whole day.
pub fn daily_series<'a, I>(records: I) -> Vec<DailyPoint>
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    let mut days = BTreeMap::new();
    for record in records {
        days.entry(record.date).or_insert_with(|| DailyPoint {
            date: record.date,
            bike_rides_daily: record.bike_rides_daily,
            avg_temp: record.avg_temp,
        });
    }
    days.into_values().collect()
}

/// Builds the weather view for trips matching `seasons`.
pub fn build_weather_report(dataset: &TripDataset, seasons: &[Season]) -> WeatherReport {
    let filter: HashSet<Season> = seasons.iter().copied().collect();
    let days = daily_series(filter_by_season(dataset.records(), &filter));

    let rides: Vec<f64> = days.iter().map(|d| d.bike_rides_daily).collect();
    let temps: Vec<f64> = days.iter().map(|d| d.avg_temp).collect();
    let rides_temperature_correlation = pearson(&rides, &temps);

    debug!(days = days.len(), ?rides_temperature_correlation, "Weather series built");

    WeatherReport {
        seasons: seasons.to_vec(),
        days,
        rides_temperature_correlation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::AggregatedGroup;
    use chrono::NaiveDate;

    fn trip(day: u32, station: &str, season: Season, rides: f64, temp: f64) -> TripRecord {
        TripRecord {
            date: NaiveDate::from_ymd_opt(2022, 5, day).unwrap(),
            start_station_name: station.to_string(),
            season,
            bike_rides_daily: rides,
            avg_temp: temp,
        }
    }

    fn dataset() -> TripDataset {
        TripDataset::new(vec![
            trip(3, "B", Season::Summer, 300.0, 30.0),
            trip(1, "A", Season::Spring, 100.0, 10.0),
            trip(1, "A", Season::Spring, 100.0, 10.0),
            trip(2, "C", Season::Spring, 200.0, 20.0),
            trip(3, "A", Season::Summer, 300.0, 30.0),
        ])
    }

    #[test]
    fn test_station_report_all_seasons() {
        let data = dataset();
        let report =
            build_station_report(&data, &data.seasons(), 20, GroupBy::Station).unwrap();

        assert_eq!(report.total_rides, 5);
        assert_eq!(report.total_rides_label, "5");
        assert_eq!(
            report.top,
            vec![
                AggregatedGroup { key: "A".into(), trip_count: 3 },
                AggregatedGroup { key: "B".into(), trip_count: 1 },
                AggregatedGroup { key: "C".into(), trip_count: 1 },
            ]
        );
    }

    #[test]
    fn test_station_report_filtered_counts_sum_to_total() {
        let data = dataset();
        let report = build_station_report(&data, &[Season::Spring], 20, GroupBy::Station).unwrap();

        assert_eq!(report.total_rides, 3);
        let sum: u64 = report.top.iter().map(|g| g.trip_count).sum();
        assert_eq!(sum, report.total_rides);
    }

    #[test]
    fn test_station_report_by_date() {
        let data = dataset();
        let report = build_station_report(&data, &data.seasons(), 1, GroupBy::Date).unwrap();
        assert_eq!(
            report.top,
            vec![AggregatedGroup { key: "2022-05-01".into(), trip_count: 2 }]
        );
    }

    #[test]
    fn test_station_report_rejects_zero() {
        let data = dataset();
        assert!(build_station_report(&data, &data.seasons(), 0, GroupBy::Station).is_err());
    }

    #[test]
    fn test_station_report_no_seasons_is_empty() {
        let data = dataset();
        let report = build_station_report(&data, &[], 20, GroupBy::Station).unwrap();
        assert_eq!(report.total_rides, 0);
        assert!(report.top.is_empty());
    }

    #[test]
    fn test_daily_series_one_point_per_date_sorted() {
        let data = dataset();
        let days = daily_series(data.records());

        let dates: Vec<u32> = days.iter().map(|d| chrono::Datelike::day(&d.date)).collect();
        assert_eq!(dates, vec![1, 2, 3]);
        assert_eq!(days[2].bike_rides_daily, 300.0);
    }

    #[test]
    fn test_weather_report_correlation() {
        let data = dataset();
        let report = build_weather_report(&data, &data.seasons());

        assert_eq!(report.days.len(), 3);
        let r = report.rides_temperature_correlation.unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_weather_report_single_day_has_no_correlation() {
        let data = dataset();
        let report = build_weather_report(&data, &[Season::Summer]);
        assert_eq!(report.days.len(), 1);
        assert_eq!(report.rides_temperature_correlation, None);
    }
}
