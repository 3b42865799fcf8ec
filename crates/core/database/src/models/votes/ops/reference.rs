use civic_result::Result;

use crate::ReferenceDb;
use crate::{PartialVote, Vote, VoteCompositeKey};

use super::AbstractVotes;

static COL: &str = "votes";

fn key(user_id: &str, report_id: &str) -> VoteCompositeKey {
    VoteCompositeKey {
        user_id: user_id.to_string(),
        report_id: report_id.to_string(),
    }
}

#[async_trait]
impl AbstractVotes for ReferenceDb {
    /// Fetch a user's vote on a report, if they have voted
    async fn fetch_vote(&self, user_id: &str, report_id: &str) -> Result<Option<Vote>> {
        self.request("find", COL).await?;
        Ok(self.votes.lock().await.get(&key(user_id, report_id)).cloned())
    }

    /// Insert a new vote, at most one may exist per user and report
    async fn insert_vote(&self, vote: &Vote) -> Result<()> {
        self.request("insert", COL).await?;

        if !self.has_report(&vote.report_id).await {
            return Err(create_database_error!("insert", COL));
        }

        {
            let mut votes = self.votes.lock().await;
            let key = key(&vote.user_id, &vote.report_id);
            if votes.contains_key(&key) {
                return Err(create_database_error!("insert", COL));
            }

            votes.insert(key, vote.clone());
        }

        self.recount_votes(&vote.report_id).await;
        Ok(())
    }

    /// Update a user's vote on a report
    async fn update_vote(
        &self,
        user_id: &str,
        report_id: &str,
        partial: &PartialVote,
    ) -> Result<()> {
        self.request("update", COL).await?;

        if let Some(vote) = self.votes.lock().await.get_mut(&key(user_id, report_id)) {
            vote.apply_options(partial.clone());
        }

        self.recount_votes(report_id).await;
        Ok(())
    }

    /// Delete a user's vote on a report
    async fn delete_vote(&self, user_id: &str, report_id: &str) -> Result<()> {
        self.request("delete", COL).await?;
        self.votes.lock().await.remove(&key(user_id, report_id));
        self.recount_votes(report_id).await;
        Ok(())
    }
}
