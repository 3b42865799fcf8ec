use civic_result::Result;
use iso8601_timestamp::Timestamp;

use crate::ReferenceDb;
use crate::{Comment, NewComment};

use super::AbstractComments;

static COL: &str = "comments";

#[async_trait]
impl AbstractComments for ReferenceDb {
    /// Fetch the comments on a report, oldest first
    async fn fetch_comments(&self, report_id: &str) -> Result<Vec<Comment>> {
        self.request("find", COL).await?;

        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .await
            .iter()
            .filter(|comment| comment.report_id == report_id)
            .cloned()
            .collect();

        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    /// Insert a new comment into the database, returning the stored row
    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.request("insert", COL).await?;

        if !self.has_report(&comment.report_id).await {
            return Err(create_database_error!("insert", COL));
        }

        let comment = Comment {
            id: ulid::Ulid::new().to_string(),
            report_id: comment.report_id.clone(),
            user_id: comment.user_id.clone(),
            content: comment.content.clone(),
            created_at: Timestamp::now_utc(),
        };

        self.comments.lock().await.push(comment.clone());
        Ok(comment)
    }
}
