use civic_result::Result;

use crate::AuthUser;
use crate::RestDb;

use super::AbstractSessions;

#[async_trait]
impl AbstractSessions for RestDb {
    /// Fetch the currently signed in user, if any
    async fn fetch_current_user(&self) -> Result<Option<AuthUser>> {
        self.fetch_auth_user().await
    }
}
