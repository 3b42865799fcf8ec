#[macro_use]
extern crate log;

#[macro_use]
extern crate civic_result;

use civic_database::{Database, DatabaseInfo, Session};
use civic_files::{Storage, StorageInfo};
use civic_result::Result;

mod card;
mod comments;
mod create;
mod feed;

pub use card::ReportCard;
pub use comments::CommentsSection;
pub use create::CreateReportForm;
pub use feed::{FeedStats, ReportFeed};

/// Handles shared by every view
///
/// The session is a plain value: views never look it up themselves.
#[derive(Clone)]
pub struct Context {
    pub db: Database,
    pub storage: Storage,
    pub session: Session,
}

impl Context {
    pub fn new(db: Database, storage: Storage, session: Session) -> Context {
        Context {
            db,
            storage,
            session,
        }
    }

    /// Connect to the configured backend and resolve the current session
    ///
    /// A session that cannot be resolved is treated as signed out.
    pub async fn connect() -> Result<Context> {
        let db = DatabaseInfo::Auto
            .connect()
            .await
            .map_err(|error| create_backend_error!("connect", "backend", error))?;

        let storage = StorageInfo::Auto.connect().await;

        let session = match Session::fetch(&db).await {
            Ok(session) => session,
            Err(error) => {
                warn!("Could not resolve session: {error}");
                Session::anonymous()
            }
        };

        Ok(Context::new(db, storage, session))
    }

    /// Replace the session, e.g. after signing in elsewhere
    pub fn with_session(mut self, session: Session) -> Context {
        self.session = session;
        self
    }
}

/// Navigation greeting for a signed in user
pub fn greeting(session: &Session) -> Option<String> {
    session.display_name().map(|name| format!("Welcome, {name}"))
}
