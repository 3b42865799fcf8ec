use civic_database::Report;
use civic_models::v0::{self, CategoryFilter};

use crate::Context;

/// Counts over every fetched report, regardless of the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub total: usize,
    /// Reports the backend has not flagged as disputed
    pub verified: usize,
    pub disputed: usize,
}

/// List of reports with a client-side category filter
#[derive(Debug, Default)]
pub struct ReportFeed {
    reports: Vec<v0::Report>,
    filter: CategoryFilter,
    loading: bool,
}

impl ReportFeed {
    pub fn new() -> ReportFeed {
        ReportFeed::default()
    }

    /// Re-fetch every report, replacing the current list
    ///
    /// A failed read is logged and leaves the feed empty.
    pub async fn refresh(&mut self, context: &Context) {
        self.loading = true;
        self.reports = match Report::fetch_with_authors(&context.db).await {
            Ok(reports) => reports,
            Err(error) => {
                error!("Error fetching reports: {error:?}");
                vec![]
            }
        };
        self.loading = false;
    }

    /// Change the category filter, the list is not re-fetched
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every fetched report, newest first
    pub fn reports(&self) -> &[v0::Report] {
        &self.reports
    }

    /// Reports matching the current filter, newest first
    pub fn visible(&self) -> Vec<&v0::Report> {
        self.filter.apply(&self.reports)
    }

    /// Number of reports matching the current filter
    pub fn visible_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| self.filter.matches(&report.category))
            .count()
    }

    pub fn stats(&self) -> FeedStats {
        let disputed = self
            .reports
            .iter()
            .filter(|report| report.is_disputed)
            .count();

        FeedStats {
            total: self.reports.len(),
            verified: self.reports.len() - disputed,
            disputed,
        }
    }

    /// Title of the list for the current filter
    pub fn heading(&self) -> String {
        match self.filter {
            CategoryFilter::All => "Latest Reports".to_string(),
            CategoryFilter::Only(category) => format!("{category} Reports"),
        }
    }

    /// "1 report found", "3 reports found"
    pub fn found(&self) -> String {
        match self.visible_count() {
            1 => "1 report found".to_string(),
            count => format!("{count} reports found"),
        }
    }

    /// Shown in place of the list when nothing matches the filter
    pub fn empty_message(&self) -> String {
        match self.filter {
            CategoryFilter::All => {
                "Be the first to report a civic issue in your community!".to_string()
            }
            CategoryFilter::Only(category) => {
                format!("No reports found in the {category} category.")
            }
        }
    }

    /// Find a fetched report by id
    pub fn get(&self, id: &str) -> Option<&v0::Report> {
        self.reports.iter().find(|report| report.id == id)
    }
}

#[cfg(test)]
mod tests {
    use civic_database::{Database, Report};
    use civic_models::v0::{Category, CategoryFilter, DataCreateReport};

    use crate::tests::{context, sign_in};
    use crate::{Context, FeedStats, ReportFeed};

    async fn file(context: &Context, title: &str, category: Category) -> Report {
        Report::create(
            &context.db,
            &context.storage,
            &context.session,
            DataCreateReport {
                title: title.to_string(),
                description: "Seen on the way to work".to_string(),
                location: "High Street".to_string(),
                category,
            },
            None,
        )
        .await
        .unwrap()
    }

    #[async_std::test]
    async fn filter_without_refetching() {
        let context = sign_in(context().await, "asha", Some("Asha Rao")).await;
        file(&context, "Pothole", Category::RoadDamage).await;
        file(&context, "Overflowing bin", Category::Garbage).await;
        file(&context, "Crater", Category::RoadDamage).await;

        let mut feed = ReportFeed::new();
        feed.refresh(&context).await;
        assert!(!feed.is_loading());
        assert_eq!(feed.reports().len(), 3);
        assert_eq!(feed.visible().len(), 3);

        let Database::Reference(reference) = &context.db else {
            unreachable!()
        };
        let requests = reference.requests().await.len();

        feed.set_filter(CategoryFilter::Only(Category::RoadDamage));
        let titles: Vec<&str> = feed
            .visible()
            .iter()
            .map(|report| report.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Crater", "Pothole"]);

        feed.set_filter(CategoryFilter::Only(Category::Traffic));
        assert!(feed.visible().is_empty());

        feed.set_filter(CategoryFilter::All);
        assert_eq!(feed.visible().len(), 3);

        assert_eq!(reference.requests().await.len(), requests);
    }

    #[async_std::test]
    async fn stats_count_every_report() {
        let context = sign_in(context().await, "asha", Some("Asha Rao")).await;
        let disputed = file(&context, "Pothole", Category::RoadDamage).await;
        file(&context, "Overflowing bin", Category::Garbage).await;
        file(&context, "Crater", Category::RoadDamage).await;

        let Database::Reference(reference) = &context.db else {
            unreachable!()
        };
        for report in reference.reports.lock().await.iter_mut() {
            if report.id == disputed.id {
                report.is_disputed = true;
            }
        }

        let mut feed = ReportFeed::new();
        feed.refresh(&context).await;
        assert_eq!(feed.heading(), "Latest Reports");
        assert_eq!(feed.found(), "3 reports found");

        let stats = FeedStats {
            total: 3,
            verified: 2,
            disputed: 1,
        };
        assert_eq!(feed.stats(), stats);

        // Filtering narrows the list but not the stats
        feed.set_filter(CategoryFilter::Only(Category::Garbage));
        assert_eq!(feed.stats(), stats);
        assert_eq!(feed.visible_count(), 1);
        assert_eq!(feed.heading(), "Garbage Reports");
        assert_eq!(feed.found(), "1 report found");

        feed.set_filter(CategoryFilter::Only(Category::TreeFallen));
        assert_eq!(feed.visible_count(), 0);
        assert_eq!(feed.found(), "0 reports found");
        assert_eq!(
            feed.empty_message(),
            "No reports found in the Tree Fallen category."
        );
    }

    #[async_std::test]
    async fn empty_feed() {
        let mut feed = ReportFeed::new();
        feed.refresh(&context().await).await;

        assert_eq!(feed.stats(), FeedStats::default());
        assert_eq!(
            feed.empty_message(),
            "Be the first to report a civic issue in your community!"
        );
    }

    #[async_std::test]
    async fn authors_are_joined() {
        let asha = sign_in(context().await, "asha", Some("Asha Rao")).await;
        file(&asha, "Fallen oak", Category::TreeFallen).await;

        let mut feed = ReportFeed::new();
        feed.refresh(&asha).await;

        let report = &feed.reports()[0];
        assert_eq!(report.author_name(), "Asha Rao");
        assert_eq!(feed.get(&report.id).unwrap().title, "Fallen oak");
    }

    #[async_std::test]
    async fn failed_read_empties_the_feed() {
        let context = sign_in(context().await, "asha", Some("Asha Rao")).await;
        file(&context, "Pothole", Category::RoadDamage).await;

        let mut feed = ReportFeed::new();
        feed.refresh(&context).await;
        assert_eq!(feed.reports().len(), 1);

        let Database::Reference(reference) = &context.db else {
            unreachable!()
        };
        reference.poison("reports").await;

        feed.refresh(&context).await;
        assert!(feed.reports().is_empty());
        assert!(!feed.is_loading());
    }
}
