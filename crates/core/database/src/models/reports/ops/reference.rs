use civic_result::Result;
use iso8601_timestamp::Timestamp;

use crate::ReferenceDb;
use crate::{NewReport, Report};

use super::AbstractReports;

static COL: &str = "reports";

#[async_trait]
impl AbstractReports for ReferenceDb {
    /// Fetch every report, newest first
    async fn fetch_reports(&self) -> Result<Vec<Report>> {
        self.request("find", COL).await?;

        let mut reports = self.reports.lock().await.clone();
        reports.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        reports.reverse();
        Ok(reports)
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        self.request("find", COL).await?;

        let reports = self.reports.lock().await;
        reports
            .iter()
            .find(|report| report.id == id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Insert a new report into the database, returning the stored row
    async fn insert_report(&self, report: &NewReport) -> Result<Report> {
        self.request("insert", COL).await?;

        let report = Report {
            id: ulid::Ulid::new().to_string(),
            title: report.title.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            category: report.category,
            image_url: report.image_url.clone(),
            user_id: report.user_id.clone(),
            created_at: Timestamp::now_utc(),
            true_votes: 0,
            false_votes: 0,
            is_disputed: false,
        };

        self.reports.lock().await.push(report.clone());
        Ok(report)
    }
}
