use civic_result::Result;

use crate::{PartialVote, Vote};

#[cfg(feature = "rest")]
mod rest;
mod reference;

#[async_trait]
pub trait AbstractVotes: Sync + Send {
    /// Fetch a user's vote on a report, if they have voted
    async fn fetch_vote(&self, user_id: &str, report_id: &str) -> Result<Option<Vote>>;

    /// Insert a new vote, at most one may exist per user and report
    async fn insert_vote(&self, vote: &Vote) -> Result<()>;

    /// Update a user's vote on a report
    async fn update_vote(
        &self,
        user_id: &str,
        report_id: &str,
        partial: &PartialVote,
    ) -> Result<()>;

    /// Delete a user's vote on a report
    async fn delete_vote(&self, user_id: &str, report_id: &str) -> Result<()>;
}
