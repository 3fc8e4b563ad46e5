//! Roll 3-hour forecast samples up into calendar days.

use chrono::{NaiveDate, TimeZone};

use crate::types::{DailySummary, ForecastSample};

/// Number of days shown in the daily forecast.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Number of samples in the hourly outlook (24 hours of 3-hour steps).
pub const HOURLY_OUTLOOK_LEN: usize = 8;

/// Group samples by their calendar date in `tz`.
///
/// Days appear in order of their first sample. The first sample of a day is
/// kept as its representative; later samples only widen min/max. At most
/// [`MAX_FORECAST_DAYS`] summaries are returned.
pub fn daily_summaries<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();

    for sample in samples {
        let date = local_date(sample, tz);
        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                day.min = day.min.min(sample.temperature);
                day.max = day.max.max(sample.temperature);
            }
            None => days.push(DailySummary {
                date,
                representative: sample.clone(),
                min: sample.temperature,
                max: sample.temperature,
            }),
        }
    }

    days.truncate(MAX_FORECAST_DAYS);
    days
}

/// The next [`HOURLY_OUTLOOK_LEN`] samples.
pub fn hourly_outlook(samples: &[ForecastSample]) -> &[ForecastSample] {
    &samples[..samples.len().min(HOURLY_OUTLOOK_LEN)]
}

fn local_date<Tz: TimeZone>(sample: &ForecastSample, tz: &Tz) -> NaiveDate {
    sample.timestamp.with_timezone(tz).date_naive()
}
