use civic_result::Result;

use crate::AuthUser;
use crate::ReferenceDb;

use super::AbstractSessions;

#[async_trait]
impl AbstractSessions for ReferenceDb {
    /// Fetch the currently signed in user, if any
    async fn fetch_current_user(&self) -> Result<Option<AuthUser>> {
        self.request("fetch", "user").await?;
        Ok(self.current_user.lock().await.clone())
    }
}
