use crate::models::{
    build_chart, AnalyticsRange, AnalyticsReport, PageView, ServiceError, TrackResult,
    CHART_ROW_LIMIT,
};
use crate::repositories::PageViewRepository;
use crate::utils::hash::is_bot;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;

pub struct AnalyticsService {
    repository: Arc<dyn PageViewRepository>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn PageViewRepository>) -> Self {
        Self { repository }
    }

    /// Append a page view unless the user agent looks automated. Every call
    /// from a real browser counts; visitors are never deduplicated.
    pub async fn record_view(
        &self,
        address: &str,
        user_agent: Option<&str>,
    ) -> Result<TrackResult, ServiceError> {
        if is_bot(user_agent) {
            tracing::debug!("Skipping page view from bot agent {:?}", user_agent);
            return Ok(TrackResult::skipped("bot"));
        }

        let view = PageView::new(address, user_agent, Utc::now());
        self.repository.insert(&view).await?;

        Ok(TrackResult::tracked())
    }

    /// Report for `range` labelled in the server's local time. Read failures
    /// yield an empty report.
    pub async fn get_analytics(&self, range: AnalyticsRange) -> AnalyticsReport {
        match self.build_report(range, Utc::now(), &Local).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Analytics unavailable for range {}: {}", range, e);
                AnalyticsReport::empty(range)
            }
        }
    }

    pub async fn build_report<Tz>(
        &self,
        range: AnalyticsRange,
        now: DateTime<Utc>,
        local: &Tz,
    ) -> Result<AnalyticsReport, ServiceError>
    where
        Tz: TimeZone + Sync,
        Tz::Offset: fmt::Display,
    {
        let since = range.window_start(now);

        let total_views = self.repository.count_since(since).await?;
        let timestamps = self
            .repository
            .timestamps_since(since, CHART_ROW_LIMIT)
            .await?;

        Ok(AnalyticsReport {
            range: range.to_string(),
            total_views,
            chart: build_chart(&timestamps, range.bucket(), local),
        })
    }
}
