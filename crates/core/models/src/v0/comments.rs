use iso8601_timestamp::Timestamp;

use super::{author_name, AuthorProfile};

auto_derived!(
    /// Comment on a report with its author's profile attached
    pub struct Comment {
        /// Unique Id
        pub id: String,
        /// Id of the report this comment belongs to
        pub report_id: String,
        /// Comment text
        pub content: String,
        /// When this comment was posted
        pub created_at: Timestamp,
        /// Id of the author
        pub user_id: String,
        /// Author profile, absent if the author has none
        pub profiles: Option<AuthorProfile>,
    }
);

impl Comment {
    /// Name to display for the author
    pub fn author_name(&self) -> &str {
        author_name(self.profiles.as_ref())
    }
}
