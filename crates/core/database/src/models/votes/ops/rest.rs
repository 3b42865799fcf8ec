use civic_result::Result;

use crate::eq;
use crate::RestDb;
use crate::{PartialVote, Vote};

use super::AbstractVotes;

static COL: &str = "votes";

fn filter(user_id: &str, report_id: &str) -> [(&'static str, String); 2] {
    [("user_id", eq(user_id)), ("report_id", eq(report_id))]
}

#[async_trait]
impl AbstractVotes for RestDb {
    /// Fetch a user's vote on a report, if they have voted
    async fn fetch_vote(&self, user_id: &str, report_id: &str) -> Result<Option<Vote>> {
        let [user, report] = filter(user_id, report_id);
        self.find_one(COL, &[("select", "*".to_string()), user, report])
            .await
    }

    /// Insert a new vote, at most one may exist per user and report
    async fn insert_vote(&self, vote: &Vote) -> Result<()> {
        self.insert_minimal(COL, vote).await
    }

    /// Update a user's vote on a report
    async fn update_vote(
        &self,
        user_id: &str,
        report_id: &str,
        partial: &PartialVote,
    ) -> Result<()> {
        self.update(COL, &filter(user_id, report_id), partial).await
    }

    /// Delete a user's vote on a report
    async fn delete_vote(&self, user_id: &str, report_id: &str) -> Result<()> {
        self.delete(COL, &filter(user_id, report_id)).await
    }
}
