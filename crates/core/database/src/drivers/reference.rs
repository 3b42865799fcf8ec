use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use civic_result::Result;
use futures::lock::Mutex;

use crate::{AuthUser, Comment, Profile, Report, Vote, VoteCompositeKey};

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub reports: Arc<Mutex<Vec<Report>>>,
        pub comments: Arc<Mutex<Vec<Comment>>>,
        pub votes: Arc<Mutex<HashMap<VoteCompositeKey, Vote>>>,
        pub profiles: Arc<Mutex<HashMap<String, Profile>>>,
        pub current_user: Arc<Mutex<Option<AuthUser>>>,

        /// Requests made so far, as "operation collection"
        pub requests: Arc<Mutex<Vec<String>>>,
        /// Collections on which every request fails
        pub poisoned: Arc<Mutex<HashSet<String>>>,
    }
);

impl ReferenceDb {
    /// Record a request, failing it if the collection is poisoned
    pub async fn request(&self, operation: &str, collection: &str) -> Result<()> {
        self.requests
            .lock()
            .await
            .push(format!("{operation} {collection}"));

        if self.poisoned.lock().await.contains(collection) {
            Err(create_database_error!(operation, collection))
        } else {
            Ok(())
        }
    }

    /// Make every following request on a collection fail
    pub async fn poison(&self, collection: &str) {
        self.poisoned.lock().await.insert(collection.to_string());
    }

    /// Requests made so far
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    /// Set the user the session endpoint reports as signed in
    pub async fn sign_in(&self, user: AuthUser) {
        *self.current_user.lock().await = Some(user);
    }

    /// Store a profile, as the backend does when a user signs up
    pub async fn insert_profile(&self, profile: Profile) {
        self.profiles
            .lock()
            .await
            .insert(profile.id.to_string(), profile);
    }

    /// Recompute a report's tallies from its votes, as the backend trigger does
    pub async fn recount_votes(&self, report_id: &str) {
        let (true_votes, false_votes) = {
            let votes = self.votes.lock().await;
            votes
                .values()
                .filter(|vote| vote.report_id == report_id)
                .fold((0, 0), |(t, f), vote| {
                    if vote.is_true_vote {
                        (t + 1, f)
                    } else {
                        (t, f + 1)
                    }
                })
        };

        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.iter_mut().find(|report| report.id == report_id) {
            report.true_votes = true_votes;
            report.false_votes = false_votes;
        }
    }

    /// Whether a report row exists
    pub async fn has_report(&self, report_id: &str) -> bool {
        self.reports
            .lock()
            .await
            .iter()
            .any(|report| report.id == report_id)
    }
}
