use civic_result::Result;

use crate::any_of;
use crate::Profile;
use crate::RestDb;

use super::AbstractProfiles;

static COL: &str = "profiles";

#[async_trait]
impl AbstractProfiles for RestDb {
    /// Fetch the profiles with the given ids, missing profiles are skipped
    async fn fetch_profiles(&self, ids: &[String]) -> Result<Vec<Profile>> {
        self.find(
            COL,
            &[("select", "id,full_name".to_string()), ("id", any_of(ids))],
        )
        .await
    }
}
