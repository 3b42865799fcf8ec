use civic_models::v0;
use civic_result::Result;
use iso8601_timestamp::Timestamp;

use crate::util::join::{join_authors, Joined};
use crate::{Database, Profile, Session};

auto_derived!(
    /// Comment on a report
    pub struct Comment {
        /// Unique Id
        pub id: String,
        /// Id of the report this comment belongs to
        pub report_id: String,
        /// Id of the author
        pub user_id: String,
        /// Comment text
        pub content: String,
        /// When this comment was posted
        pub created_at: Timestamp,
    }

    /// Comment row before the backend assigns its id and timestamp
    pub struct NewComment {
        pub report_id: String,
        pub user_id: String,
        pub content: String,
    }
);

impl Comment {
    /// Convert into the API model with the author's profile attached
    pub fn into_model(self, profile: Option<Profile>) -> v0::Comment {
        v0::Comment {
            id: self.id,
            report_id: self.report_id,
            content: self.content,
            created_at: self.created_at,
            user_id: self.user_id,
            profiles: profile.map(Into::into),
        }
    }

    /// Fetch the comments on a report, oldest first, with their authors' profiles
    pub async fn fetch_with_authors(db: &Database, report_id: &str) -> Result<Vec<v0::Comment>> {
        let comments = db.fetch_comments(report_id).await?;
        Ok(
            join_authors(db, comments, |comment: &Comment| comment.user_id.as_str())
                .await?
                .into_iter()
                .map(|Joined { entity, profile }| entity.into_model(profile))
                .collect(),
        )
    }

    /// Post a new comment on a report
    pub async fn create(
        db: &Database,
        session: &Session,
        report_id: &str,
        content: &str,
    ) -> Result<Comment> {
        let user = session.user()?;

        let content = content.trim();
        if content.is_empty() {
            return Err(create_error!(EmptyComment));
        }

        db.insert_comment(&NewComment {
            report_id: report_id.to_string(),
            user_id: user.id.to_string(),
            content: content.to_string(),
        })
        .await
    }
}
