use civic_result::Result;

use crate::{Comment, NewComment};

#[cfg(feature = "rest")]
mod rest;
mod reference;

#[async_trait]
pub trait AbstractComments: Sync + Send {
    /// Fetch the comments on a report, oldest first
    async fn fetch_comments(&self, report_id: &str) -> Result<Vec<Comment>>;

    /// Insert a new comment into the database, returning the stored row
    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment>;
}
