use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::from_str;

use crate::{AuthUser, Comment, Database, Profile, Report, Session, Vote, VoteCompositeKey};

static RE_ID: Lazy<Regex> = Lazy::new(|| Regex::new("__ID:(\\d+)__").unwrap());

#[derive(Debug, Deserialize)]
#[serde(tag = "_object_type")]
enum LoadedFixture {
    Profile(Profile),
    Report(Report),
    Comment(Comment),
    Vote(Vote),
}

pub async fn load_fixture(db: &Database, input: &str) -> HashMap<String, String> {
    let mut ids = HashMap::<String, String>::new();
    let input = RE_ID.replace_all(input, |cap: &Captures| {
        let d = cap.get(1).unwrap().as_str();

        if !ids.contains_key(d) {
            ids.insert(d.to_string(), ulid::Ulid::new().to_string());
        }

        ids.get(d).unwrap().clone()
    });

    // Deserialise the fixtures
    let items: Vec<LoadedFixture> = from_str(&input).expect("Failed to deserialise fixture");

    #[allow(irrefutable_let_patterns)]
    let Database::Reference(reference) = db else {
        panic!("fixtures are only supported on the reference database")
    };

    // Load all of the items within, rows keep their ids and timestamps
    for item in items {
        match item {
            LoadedFixture::Profile(profile) => reference.insert_profile(profile).await,
            LoadedFixture::Report(report) => reference.reports.lock().await.push(report),
            LoadedFixture::Comment(comment) => reference.comments.lock().await.push(comment),
            LoadedFixture::Vote(vote) => {
                let report_id = vote.report_id.to_string();
                reference.votes.lock().await.insert(
                    VoteCompositeKey {
                        user_id: vote.user_id.to_string(),
                        report_id: report_id.to_string(),
                    },
                    vote,
                );
                reference.recount_votes(&report_id).await;
            }
        }
    }

    // Return IDs for ease of use
    ids
}

#[async_trait]
pub trait FetchFixture {
    async fn report(&self, db: &Database, d: usize) -> Report;
    async fn profile(&self, db: &Database, d: usize) -> Profile;
    async fn session(&self, db: &Database, d: usize) -> Session;
}

#[async_trait]
impl FetchFixture for HashMap<String, String> {
    async fn report(&self, db: &Database, d: usize) -> Report {
        db.fetch_report(self.get(&d.to_string()).unwrap())
            .await
            .unwrap()
    }

    async fn profile(&self, db: &Database, d: usize) -> Profile {
        db.fetch_profiles(&[self.get(&d.to_string()).unwrap().to_string()])
            .await
            .unwrap()
            .remove(0)
    }

    /// Session signed in as the given user, with their profile if one exists
    async fn session(&self, db: &Database, d: usize) -> Session {
        let id = self.get(&d.to_string()).unwrap().to_string();
        let profile = db
            .fetch_profiles(&[id.to_string()])
            .await
            .unwrap()
            .into_iter()
            .next();

        Session::signed_in(
            AuthUser {
                id,
                email: Some(format!("user{d}@example.org")),
            },
            profile,
        )
    }
}

#[macro_export]
macro_rules! fixture {
    ( $database:expr, $name:expr, $( $variable:ident $type:ident $id: expr )+ ) => {
        use $crate::util::test_fixtures::FetchFixture;

        let fixtures = $crate::util::test_fixtures::load_fixture(
            &$database,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/", $name, ".json")),
        )
        .await;

        $(
            let $variable = fixtures.$type(&$database, $id).await;
        )+
    };
}
