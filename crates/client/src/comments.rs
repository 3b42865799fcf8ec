use civic_database::{Comment, Session};
use civic_models::v0;
use civic_result::Result;

use crate::Context;

/// Comments on a report with a draft for posting a new one
#[derive(Debug)]
pub struct CommentsSection {
    report_id: String,
    comments: Vec<v0::Comment>,
    pub draft: String,
    loading: bool,
    submitting: bool,
}

impl CommentsSection {
    pub fn new(report_id: &str) -> CommentsSection {
        CommentsSection {
            report_id: report_id.to_string(),
            comments: vec![],
            draft: String::new(),
            loading: false,
            submitting: false,
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// Comments, oldest first
    pub fn comments(&self) -> &[v0::Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the draft can be posted right now
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.draft.trim().is_empty()
    }

    /// Prompt shown above the draft
    pub fn prompt(session: &Session) -> String {
        match session.display_name() {
            Some(name) => format!("Share your thoughts, {name}..."),
            None => "Please login to post comments".to_string(),
        }
    }

    /// Re-fetch the comments, replacing the current list
    ///
    /// A failed read is logged and leaves the list empty.
    pub async fn refresh(&mut self, context: &Context) {
        self.loading = true;
        self.comments = match Comment::fetch_with_authors(&context.db, &self.report_id).await {
            Ok(comments) => comments,
            Err(error) => {
                error!("Error fetching comments on {}: {error:?}", self.report_id);
                vec![]
            }
        };
        self.loading = false;
    }

    /// Post the draft, then clear it and re-fetch the comments
    ///
    /// The draft is kept if posting fails.
    pub async fn submit(&mut self, context: &Context) -> Result<()> {
        self.submitting = true;
        let result = Comment::create(
            &context.db,
            &context.session,
            &self.report_id,
            &self.draft,
        )
        .await;
        self.submitting = false;

        result?;
        self.draft.clear();
        self.refresh(context).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use civic_database::{Database, Report};
    use civic_models::v0::{Category, DataCreateReport};
    use civic_result::ErrorType;

    use crate::tests::{context, sign_in};
    use crate::{CommentsSection, Context};

    async fn section(context: &Context) -> CommentsSection {
        let report = Report::create(
            &context.db,
            &context.storage,
            &context.session,
            DataCreateReport {
                title: "Graffiti on bus shelter".to_string(),
                description: "Covers the timetable".to_string(),
                location: "Mill Lane stop".to_string(),
                category: Category::PublicPropertyDamage,
            },
            None,
        )
        .await
        .unwrap();

        CommentsSection::new(&report.id)
    }

    #[async_std::test]
    async fn prompt_follows_session() {
        let anonymous = context().await;
        assert_eq!(
            CommentsSection::prompt(&anonymous.session),
            "Please login to post comments"
        );

        let asha = sign_in(context().await, "asha", Some("Asha Rao")).await;
        assert_eq!(
            CommentsSection::prompt(&asha.session),
            "Share your thoughts, Asha Rao..."
        );
    }

    #[async_std::test]
    async fn submit_clears_draft_and_refreshes() {
        let asha = sign_in(context().await, "asha", Some("Asha Rao")).await;
        let mut section = section(&asha).await;

        section.draft = "  Council has been told  ".to_string();
        assert!(section.can_submit());
        section.submit(&asha).await.unwrap();

        assert!(section.draft.is_empty());
        assert!(!section.is_submitting());
        assert_eq!(section.comments().len(), 1);
        assert_eq!(section.comments()[0].content, "Council has been told");
        assert_eq!(section.comments()[0].author_name(), "Asha Rao");

        let ben = sign_in(asha.clone(), "ben", None).await;
        section.draft = "Saw it too".to_string();
        section.submit(&ben).await.unwrap();

        let contents: Vec<&str> = section
            .comments()
            .iter()
            .map(|comment| comment.content.as_str())
            .collect();
        assert_eq!(contents, vec!["Council has been told", "Saw it too"]);
        assert_eq!(section.comments()[1].author_name(), "Anonymous");
    }

    #[async_std::test]
    async fn blank_draft_is_kept_and_rejected() {
        let asha = sign_in(context().await, "asha", Some("Asha Rao")).await;
        let mut section = section(&asha).await;

        section.draft = "   ".to_string();
        assert!(!section.can_submit());

        let error = section.submit(&asha).await.unwrap_err();
        assert_eq!(error.error_type, ErrorType::EmptyComment);
        assert_eq!(section.draft, "   ");
    }

    #[async_std::test]
    async fn failed_post_keeps_draft() {
        let asha = sign_in(context().await, "asha", Some("Asha Rao")).await;
        let mut section = section(&asha).await;

        let Database::Reference(reference) = &asha.db else {
            unreachable!()
        };
        reference.poison("comments").await;

        section.draft = "Any update?".to_string();
        let error = section.submit(&asha).await.unwrap_err();
        assert_eq!(error.to_string(), "failed to insert comments");
        assert_eq!(section.draft, "Any update?");
        assert!(!section.is_submitting());
    }
}
