use civic_models::v0::VoteDirection;
use civic_result::Result;

use crate::{AuthUser, Database, Session};

auto_derived_partial!(
    /// Vote on the validity of a report
    pub struct Vote {
        /// Id of the voter
        pub user_id: String,
        /// Id of the report voted on
        pub report_id: String,
        /// Whether the voter confirmed the report
        pub is_true_vote: bool,
    },
    "PartialVote"
);

auto_derived!(
    /// Composite primary key consisting of voter and report id
    #[derive(Hash, Default)]
    pub struct VoteCompositeKey {
        /// Id of the voter
        pub user_id: String,
        /// Id of the report voted on
        pub report_id: String,
    }
);

/// Vote held by one user on one report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoteState {
    #[default]
    NoVote,
    Voted(VoteDirection),
}

/// Change to apply to the stored vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Create(VoteDirection),
    Update(VoteDirection),
    Delete,
}

impl VoteState {
    /// Work out the change a vote in the given direction makes
    ///
    /// Voting the same way twice withdraws the vote, voting the
    /// other way switches it.
    pub fn transition(self, direction: VoteDirection) -> (VoteAction, VoteState) {
        match self {
            VoteState::NoVote => (VoteAction::Create(direction), VoteState::Voted(direction)),
            VoteState::Voted(current) if current == direction => {
                (VoteAction::Delete, VoteState::NoVote)
            }
            VoteState::Voted(_) => (VoteAction::Update(direction), VoteState::Voted(direction)),
        }
    }

    /// Direction of the vote, if any
    pub fn direction(&self) -> Option<VoteDirection> {
        match self {
            VoteState::NoVote => None,
            VoteState::Voted(direction) => Some(*direction),
        }
    }
}

impl From<Option<Vote>> for VoteState {
    fn from(vote: Option<Vote>) -> Self {
        vote.map_or(VoteState::NoVote, |vote| {
            VoteState::Voted(vote.is_true_vote.into())
        })
    }
}

impl Vote {
    /// Fetch the state of a user's vote on a report
    pub async fn fetch_state(db: &Database, user: &AuthUser, report_id: &str) -> Result<VoteState> {
        db.fetch_vote(&user.id, report_id).await.map(Into::into)
    }

    /// Apply a vote in the given direction on top of the current state
    ///
    /// Tallies are owned by the backend, callers should re-fetch the
    /// report afterwards.
    pub async fn toggle(
        db: &Database,
        session: &Session,
        report_id: &str,
        current: VoteState,
        direction: VoteDirection,
    ) -> Result<VoteState> {
        let user = session.user()?;
        let (action, next) = current.transition(direction);

        match action {
            VoteAction::Create(direction) => {
                db.insert_vote(&Vote {
                    user_id: user.id.to_string(),
                    report_id: report_id.to_string(),
                    is_true_vote: direction.is_true(),
                })
                .await?
            }
            VoteAction::Update(direction) => {
                db.update_vote(
                    &user.id,
                    report_id,
                    &PartialVote {
                        is_true_vote: Some(direction.is_true()),
                        ..Default::default()
                    },
                )
                .await?
            }
            VoteAction::Delete => db.delete_vote(&user.id, report_id).await?,
        }

        debug!("{} voted on {}: {:?} -> {:?}", user.id, report_id, current, next);
        Ok(next)
    }
}
