use civic_database::Report;
use civic_files::ImageUpload;
use civic_models::v0::{Category, DataCreateReport};
use civic_result::Result;

use crate::Context;

/// Form for filing a new report
#[derive(Debug, Default)]
pub struct CreateReportForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: Option<Category>,
    pub image: Option<ImageUpload>,
    open: bool,
    loading: bool,
}

impl CreateReportForm {
    pub fn new() -> CreateReportForm {
        CreateReportForm::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Clear every input
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.location.clear();
        self.category = None;
        self.image = None;
    }

    /// File the report, uploading the image first if one is attached
    ///
    /// On success the form is reset and closed, the caller should then
    /// refresh its feed. On failure the inputs are left untouched.
    pub async fn submit(&mut self, context: &Context) -> Result<Report> {
        let category = self.category.ok_or_else(|| {
            create_error!(FailedValidation {
                error: "Category is required".to_string()
            })
        })?;

        let data = DataCreateReport {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            category,
        };

        self.loading = true;
        let result = Report::create(
            &context.db,
            &context.storage,
            &context.session,
            data,
            self.image.as_ref(),
        )
        .await;
        self.loading = false;

        let report = result?;
        self.reset();
        self.close();
        Ok(report)
    }
}
