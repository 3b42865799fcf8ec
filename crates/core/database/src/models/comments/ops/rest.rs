use civic_result::Result;

use crate::eq;
use crate::RestDb;
use crate::{Comment, NewComment};

use super::AbstractComments;

static COL: &str = "comments";

#[async_trait]
impl AbstractComments for RestDb {
    /// Fetch the comments on a report, oldest first
    async fn fetch_comments(&self, report_id: &str) -> Result<Vec<Comment>> {
        self.find(
            COL,
            &[
                ("select", "*".to_string()),
                ("report_id", eq(report_id)),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    /// Insert a new comment into the database, returning the stored row
    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.insert_one(COL, comment).await
    }
}
