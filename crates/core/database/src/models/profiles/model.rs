use civic_models::v0;

auto_derived!(
    /// Public profile of a user
    pub struct Profile {
        /// Id of the user this profile belongs to
        pub id: String,
        /// Display name
        #[serde(default)]
        pub full_name: Option<String>,
    }
);

impl From<Profile> for v0::AuthorProfile {
    fn from(value: Profile) -> Self {
        v0::AuthorProfile {
            full_name: value.full_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use civic_models::v0;

    use crate::fixture;

    #[async_std::test]
    async fn missing_profiles_are_skipped() {
        database_test!(|db| async move {
            fixture!(db, "neighbourhood",
                asha profile 0
                ben profile 1
                report report 11);

            // The author of report 11 has no profile
            let profiles = db
                .fetch_profiles(&[
                    ben.id.to_string(),
                    report.user_id.to_string(),
                    asha.id.to_string(),
                ])
                .await
                .unwrap();
            assert_eq!(profiles, vec![ben, asha.clone()]);

            let author: v0::AuthorProfile = asha.into();
            assert_eq!(v0::author_name(Some(&author)), "Asha Rao");
        });
    }
}
