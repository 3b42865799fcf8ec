use civic_files::{ImageUpload, Storage};
use civic_models::v0::{self, Category};
use civic_result::Result;
use iso8601_timestamp::Timestamp;

use crate::util::join::{join_authors, Joined};
use crate::{Database, Profile, Session};

auto_derived!(
    /// Civic issue report
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
        #[serde(default)]
        pub image_url: Option<String>,
        /// Id of the author
        pub user_id: String,
        /// When this report was created
        pub created_at: Timestamp,

        /// Number of true votes, maintained by the backend
        #[serde(default)]
        pub true_votes: i64,
        /// Number of false votes, maintained by the backend
        #[serde(default)]
        pub false_votes: i64,
        /// Whether the backend has flagged this report as disputed
        #[serde(default)]
        pub is_disputed: bool,
    }

    /// Report row before the backend assigns its id and timestamp
    pub struct NewReport {
        pub title: String,
        pub description: String,
        pub location: String,
        pub category: Category,
        pub image_url: Option<String>,
        pub user_id: String,
    }
);

impl Report {
    /// Convert into the API model with the author's profile attached
    pub fn into_model(self, profile: Option<Profile>) -> v0::Report {
        v0::Report {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            category: self.category,
            image_url: self.image_url,
            true_votes: self.true_votes,
            false_votes: self.false_votes,
            is_disputed: self.is_disputed,
            created_at: self.created_at,
            user_id: self.user_id,
            profiles: profile.map(Into::into),
        }
    }

    /// Fetch every report, newest first, with its author's profile
    pub async fn fetch_with_authors(db: &Database) -> Result<Vec<v0::Report>> {
        let reports = db.fetch_reports().await?;
        Ok(
            join_authors(db, reports, |report: &Report| report.user_id.as_str())
                .await?
                .into_iter()
                .map(|Joined { entity, profile }| entity.into_model(profile))
                .collect(),
        )
    }

    /// Create a new report
    ///
    /// The image, if any, is uploaded first and the report is only
    /// inserted once the upload has succeeded. An image whose report
    /// fails to insert is left in storage.
    pub async fn create(
        db: &Database,
        storage: &Storage,
        session: &Session,
        data: v0::DataCreateReport,
        image: Option<&ImageUpload>,
    ) -> Result<Report> {
        let user = session.user()?;
        data.validate()?;

        let image_url = match image {
            Some(image) => Some(storage.upload(image).await?),
            None => None,
        };

        let report = db
            .insert_report(&NewReport {
                title: data.title,
                description: data.description,
                location: data.location,
                category: data.category,
                image_url,
                user_id: user.id.to_string(),
            })
            .await?;

        info!("Created report {} ({})", report.id, report.category);
        Ok(report)
    }
}
