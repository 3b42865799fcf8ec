use civic_database::{Vote, VoteState};
use civic_models::v0::{self, VoteDirection};
use civic_result::Result;

use crate::{CommentsSection, Context};

/// Single report with the viewer's vote and its comments
#[derive(Debug)]
pub struct ReportCard {
    pub report: v0::Report,
    vote: VoteState,
    loading: bool,
    comments: Option<CommentsSection>,
}

impl ReportCard {
    pub fn new(report: v0::Report) -> ReportCard {
        ReportCard {
            report,
            vote: VoteState::NoVote,
            loading: false,
            comments: None,
        }
    }

    pub fn vote_state(&self) -> VoteState {
        self.vote
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn comments(&self) -> Option<&CommentsSection> {
        self.comments.as_ref()
    }

    pub fn comments_mut(&mut self) -> Option<&mut CommentsSection> {
        self.comments.as_mut()
    }

    /// Load the signed in user's vote on this report
    pub async fn load_vote(&mut self, context: &Context) {
        let Ok(user) = context.session.user() else {
            self.vote = VoteState::NoVote;
            return;
        };

        match Vote::fetch_state(&context.db, user, &self.report.id).await {
            Ok(state) => self.vote = state,
            Err(error) => error!("Error fetching vote on {}: {error:?}", self.report.id),
        }
    }

    /// Vote on this report, or withdraw the vote when repeating a direction
    ///
    /// The displayed state only changes once the backend accepts the
    /// vote, tallies are then re-read from the backend.
    pub async fn vote(&mut self, context: &Context, direction: VoteDirection) -> Result<VoteState> {
        self.loading = true;
        let result = Vote::toggle(
            &context.db,
            &context.session,
            &self.report.id,
            self.vote,
            direction,
        )
        .await;

        match result {
            Ok(state) => {
                self.vote = state;
                self.refresh_tally(context).await;
                self.loading = false;
                Ok(state)
            }
            Err(error) => {
                self.loading = false;
                Err(error)
            }
        }
    }

    async fn refresh_tally(&mut self, context: &Context) {
        match context.db.fetch_report(&self.report.id).await {
            Ok(report) => {
                self.report.true_votes = report.true_votes;
                self.report.false_votes = report.false_votes;
                self.report.is_disputed = report.is_disputed;
            }
            Err(error) => error!("Error refreshing tally of {}: {error:?}", self.report.id),
        }
    }

    /// Show or hide the comments, fetching them when shown
    pub async fn toggle_comments(&mut self, context: &Context) {
        if self.comments.take().is_none() {
            let mut section = CommentsSection::new(&self.report.id);
            section.refresh(context).await;
            self.comments = Some(section);
        }
    }
}
