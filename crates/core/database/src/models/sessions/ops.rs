use civic_result::Result;

use crate::AuthUser;

#[cfg(feature = "rest")]
mod rest;
mod reference;

#[async_trait]
pub trait AbstractSessions: Sync + Send {
    /// Fetch the currently signed in user, if any
    async fn fetch_current_user(&self) -> Result<Option<AuthUser>>;
}
