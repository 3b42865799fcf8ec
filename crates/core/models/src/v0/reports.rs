use civic_result::{create_error, Result};
use iso8601_timestamp::Timestamp;

use super::{author_name, AuthorProfile, Category};

auto_derived!(
    /// Civic issue report with its author's profile attached
    pub struct Report {
        /// Unique Id
        pub id: String,
        /// Short summary of the issue
        pub title: String,
        /// Detailed description of the issue
        pub description: String,
        /// Street address or landmark
        pub location: String,
        /// Kind of issue
        pub category: Category,
        /// Public URL of the attached image
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        pub image_url: Option<String>,
        /// Number of users who confirmed this report
        pub true_votes: i64,
        /// Number of users who disputed this report
        pub false_votes: i64,
        /// Whether the backend has flagged this report as disputed
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "crate::if_false", default))]
        pub is_disputed: bool,
        /// When this report was created
        pub created_at: Timestamp,
        /// Id of the author
        pub user_id: String,
        /// Author profile, absent if the author has none
        pub profiles: Option<AuthorProfile>,
    }

    /// New report information
    pub struct DataCreateReport {
        /// Short summary of the issue
        pub title: String,
        /// Detailed description of the issue
        pub description: String,
        /// Street address or landmark
        pub location: String,
        /// Kind of issue
        pub category: Category,
    }
);

impl Report {
    /// Name to display for the author
    pub fn author_name(&self) -> &str {
        author_name(self.profiles.as_ref())
    }
}

impl DataCreateReport {
    /// Check every required field is filled in
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("Title", &self.title),
            ("Description", &self.description),
            ("Location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(create_error!(FailedValidation {
                    error: format!("{field} is required")
                }));
            }
        }

        Ok(())
    }
}
