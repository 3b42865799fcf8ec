use civic_result::Result;

use crate::eq;
use crate::RestDb;
use crate::{NewReport, Report};

use super::AbstractReports;

static COL: &str = "reports";

#[async_trait]
impl AbstractReports for RestDb {
    /// Fetch every report, newest first
    async fn fetch_reports(&self) -> Result<Vec<Report>> {
        self.find(
            COL,
            &[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        self.find_one(COL, &[("select", "*".to_string()), ("id", eq(id))])
            .await?
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Insert a new report into the database, returning the stored row
    async fn insert_report(&self, report: &NewReport) -> Result<Report> {
        self.insert_one(COL, report).await
    }
}
