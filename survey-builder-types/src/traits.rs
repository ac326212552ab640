use std::future::Future;

use crate::{Page, QuestionType, Survey, SurveyId, SurveySummary};

/// The survey persistence collaborator.
///
/// Implemented by the REST client and by an in-memory store for tests.
/// The editor never validates metadata before handing a survey over.
pub trait SurveyStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    /// List all surveys for the dashboard.
    fn list_surveys(&self) -> impl Future<Output = Result<Vec<SurveySummary>, Self::Error>> + Send;

    /// Load one survey, or `None` if it does not exist.
    fn load_survey(
        &self,
        id: SurveyId,
    ) -> impl Future<Output = Result<Option<Survey>, Self::Error>> + Send;

    /// Save a new survey and return it with its assigned id.
    fn create_survey(&self, survey: &Survey)
    -> impl Future<Output = Result<Survey, Self::Error>> + Send;

    /// Overwrite an existing survey.
    fn update_survey(
        &self,
        id: SurveyId,
        survey: &Survey,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Delete a survey. Deleting a missing survey is not an error.
    fn delete_survey(&self, id: SurveyId) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// The question types offered by the lookup service.
    fn question_types(&self) -> impl Future<Output = Result<Vec<QuestionType>, Self::Error>> + Send;
}

/// A paginated listing, fetched one page at a time.
///
/// Pages are numbered from 1.
pub trait PageSource<T> {
    /// The error type for this source.
    type Error;

    /// Fetch one page.
    fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Page<T>, Self::Error>> + Send;
}
