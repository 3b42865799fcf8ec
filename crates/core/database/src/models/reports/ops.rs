use civic_result::Result;

use crate::{NewReport, Report};

#[cfg(feature = "rest")]
mod rest;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Fetch every report, newest first
    async fn fetch_reports(&self) -> Result<Vec<Report>>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Insert a new report into the database, returning the stored row
    async fn insert_report(&self, report: &NewReport) -> Result<Report>;
}
