use civic_result::Result;

use crate::Profile;
use crate::ReferenceDb;

use super::AbstractProfiles;

static COL: &str = "profiles";

#[async_trait]
impl AbstractProfiles for ReferenceDb {
    /// Fetch the profiles with the given ids, missing profiles are skipped
    async fn fetch_profiles(&self, ids: &[String]) -> Result<Vec<Profile>> {
        self.request("find", COL).await?;

        let profiles = self.profiles.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| profiles.get(id).cloned())
            .collect())
    }
}
