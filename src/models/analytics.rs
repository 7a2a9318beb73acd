use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// Upper bound on rows scanned for the chart. `total_views` is counted
/// separately, so ranges with more events than this undercount the chart.
pub const CHART_ROW_LIMIT: i64 = 10_000;

pub const INVALID_RANGE_MESSAGE: &str = "Invalid range. Valid ranges: 1h, 1d, 7d, 1m, 1y, all";

#[derive(Debug, Deserialize, IntoParams)]
pub struct AnalyticsQuery {
    /// One of 1h, 1d, 7d, 1m, 1y, all (defaults to 7d)
    pub range: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsRange {
    LastHour,
    LastDay,
    #[default]
    LastWeek,
    LastMonth,
    LastYear,
    AllTime,
}

/// Time granularity of one chart bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Minute,
    Hour,
    Day,
    Month,
}

impl AnalyticsRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsRange::LastHour => "1h",
            AnalyticsRange::LastDay => "1d",
            AnalyticsRange::LastWeek => "7d",
            AnalyticsRange::LastMonth => "1m",
            AnalyticsRange::LastYear => "1y",
            AnalyticsRange::AllTime => "all",
        }
    }

    /// Earliest `viewed_at` included in the report, or `None` for no lower bound.
    pub fn window_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            AnalyticsRange::LastHour => Some(now - Duration::hours(1)),
            AnalyticsRange::LastDay => Some(now - Duration::hours(24)),
            AnalyticsRange::LastWeek => Some(now - Duration::days(7)),
            AnalyticsRange::LastMonth => Some(months_before(now, 1)),
            AnalyticsRange::LastYear => Some(months_before(now, 12)),
            AnalyticsRange::AllTime => None,
        }
    }

    pub fn bucket(&self) -> Bucket {
        match self {
            AnalyticsRange::LastHour => Bucket::Minute,
            AnalyticsRange::LastDay => Bucket::Hour,
            AnalyticsRange::LastWeek | AnalyticsRange::LastMonth => Bucket::Day,
            AnalyticsRange::LastYear | AnalyticsRange::AllTime => Bucket::Month,
        }
    }
}

/// Steps back whole calendar months keeping the day of month. A day past the
/// end of the target month overflows into the next one, so March 31 minus
/// one month is March 3 (or March 2 in a leap year).
fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let index = now.year() * 12 + now.month0() as i32 - months as i32;
    let first_of_month =
        NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1);

    match first_of_month {
        Some(first) => (first + Duration::days(i64::from(now.day0())))
            .and_time(now.time())
            .and_utc(),
        None => now - Duration::days(31 * i64::from(months)),
    }
}

impl FromStr for AnalyticsRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(AnalyticsRange::LastHour),
            "1d" => Ok(AnalyticsRange::LastDay),
            "7d" => Ok(AnalyticsRange::LastWeek),
            "1m" => Ok(AnalyticsRange::LastMonth),
            "1y" => Ok(AnalyticsRange::LastYear),
            "all" => Ok(AnalyticsRange::AllTime),
            _ => Err(INVALID_RANGE_MESSAGE.to_string()),
        }
    }
}

impl fmt::Display for AnalyticsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Bucket {
    /// Chart label for an event. Minute, hour and month labels use the
    /// server's wall clock (`local`); day labels are the UTC calendar date.
    pub fn label<Tz>(&self, viewed_at: DateTime<Utc>, local: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let wall_clock = viewed_at.with_timezone(local);
        match self {
            Bucket::Minute => wall_clock.format("%H:%M").to_string(),
            Bucket::Hour => wall_clock.format("%H:00").to_string(),
            Bucket::Day => viewed_at.format("%Y-%m-%d").to_string(),
            Bucket::Month => wall_clock.format("%Y-%m").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub label: String,
    pub views: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyticsReport {
    pub range: String,
    pub total_views: i64,
    pub chart: Vec<ChartPoint>,
}

impl AnalyticsReport {
    pub fn empty(range: AnalyticsRange) -> Self {
        Self {
            range: range.to_string(),
            total_views: 0,
            chart: Vec::new(),
        }
    }
}

/// Collapse ascending timestamps into labelled counts. Labels keep the order
/// in which they were first seen and empty buckets are never emitted.
pub fn build_chart<Tz>(timestamps: &[DateTime<Utc>], bucket: Bucket, local: &Tz) -> Vec<ChartPoint>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut chart: Vec<ChartPoint> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for viewed_at in timestamps {
        let label = bucket.label(*viewed_at, local);
        match positions.get(&label) {
            Some(&index) => chart[index].views += 1,
            None => {
                positions.insert(label.clone(), chart.len());
                chart.push(ChartPoint { label, views: 1 });
            }
        }
    }

    chart
}
