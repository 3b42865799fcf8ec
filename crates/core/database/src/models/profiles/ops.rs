use civic_result::Result;

use crate::Profile;

#[cfg(feature = "rest")]
mod rest;
mod reference;

#[async_trait]
pub trait AbstractProfiles: Sync + Send {
    /// Fetch the profiles with the given ids, missing profiles are skipped
    async fn fetch_profiles(&self, ids: &[String]) -> Result<Vec<Profile>>;
}
