mod comments;
mod profiles;
mod reports;
mod sessions;
mod votes;

pub use comments::*;
pub use profiles::*;
pub use reports::*;
pub use sessions::*;
pub use votes::*;

use crate::{Database, ReferenceDb};
#[cfg(feature = "rest")]
use crate::RestDb;

pub trait AbstractDatabase:
    Sync
    + Send
    + comments::AbstractComments
    + profiles::AbstractProfiles
    + reports::AbstractReports
    + sessions::AbstractSessions
    + votes::AbstractVotes
{
}

impl AbstractDatabase for ReferenceDb {}
#[cfg(feature = "rest")]
impl AbstractDatabase for RestDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
            #[cfg(feature = "rest")]
            Database::Rest(rest) => rest,
        }
    }
}
