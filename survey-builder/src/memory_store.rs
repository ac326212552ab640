//! In-memory survey store for tests and offline use.
//!
//! `InMemorySurveyStore` keeps surveys in a map keyed by their id and hands
//! out ids the way the persistence API does, counting up from 1.
//!
//! # Example
//!
//! ```rust
//! use survey_builder::{InMemorySurveyStore, Survey, SurveyStore};
//!
//! # tokio_test_block(async {
//! let store = InMemorySurveyStore::new().with_survey(Survey::new("Team lunch"));
//! let surveys = store.list_surveys().await.unwrap();
//! assert_eq!(surveys[0].title, "Team lunch");
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{QuestionType, QuestionTypeRegistry, Survey, SurveyId, SurveyStore, SurveySummary};

/// A survey store that lives entirely in memory.
#[derive(Debug)]
pub struct InMemorySurveyStore {
    surveys: Mutex<BTreeMap<SurveyId, Survey>>,
    question_types: Vec<QuestionType>,
    next_id: AtomicU64,
}

/// Error type for InMemorySurveyStore.
#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("Survey not found: {0}")]
    NotFound(SurveyId),

    #[error("Survey store lock poisoned")]
    Poisoned,
}

impl Default for InMemorySurveyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySurveyStore {
    /// Create an empty store offering the standard question types.
    pub fn new() -> Self {
        Self {
            surveys: Mutex::new(BTreeMap::new()),
            question_types: QuestionTypeRegistry::standard().types().to_vec(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Add a survey, assigning it the next free id.
    pub fn with_survey(self, survey: Survey) -> Self {
        let id = self.allocate();
        if let Ok(mut surveys) = self.surveys.lock() {
            surveys.insert(id, survey.with_id(id));
        }
        self
    }

    /// Replace the question types the store reports.
    pub fn with_question_types(mut self, types: Vec<QuestionType>) -> Self {
        self.question_types = types;
        self
    }

    /// Number of stored surveys.
    pub fn len(&self) -> usize {
        self.surveys.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Check if the store holds no surveys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate(&self) -> SurveyId {
        SurveyId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn with_surveys<R>(
        &self,
        f: impl FnOnce(&mut BTreeMap<SurveyId, Survey>) -> Result<R, MemoryStoreError>,
    ) -> Result<R, MemoryStoreError> {
        let mut surveys = self.surveys.lock().map_err(|_| MemoryStoreError::Poisoned)?;
        f(&mut surveys)
    }
}

impl SurveyStore for InMemorySurveyStore {
    type Error = MemoryStoreError;

    async fn list_surveys(&self) -> Result<Vec<SurveySummary>, Self::Error> {
        self.with_surveys(|surveys| {
            Ok(surveys
                .iter()
                .map(|(id, survey)| SurveySummary {
                    id: *id,
                    title: survey.title.clone(),
                    description: survey.description.clone(),
                    response_count: 0,
                    is_active: true,
                })
                .collect())
        })
    }

    async fn load_survey(&self, id: SurveyId) -> Result<Option<Survey>, Self::Error> {
        self.with_surveys(|surveys| Ok(surveys.get(&id).cloned()))
    }

    async fn create_survey(&self, survey: &Survey) -> Result<Survey, Self::Error> {
        let id = self.allocate();
        let created = survey.clone().with_id(id);
        log::debug!("storing survey {id} in memory");
        self.with_surveys(|surveys| {
            surveys.insert(id, created.clone());
            Ok(created)
        })
    }

    async fn update_survey(&self, id: SurveyId, survey: &Survey) -> Result<(), Self::Error> {
        self.with_surveys(|surveys| match surveys.get_mut(&id) {
            Some(stored) => {
                *stored = survey.clone().with_id(id);
                Ok(())
            }
            None => Err(MemoryStoreError::NotFound(id)),
        })
    }

    async fn delete_survey(&self, id: SurveyId) -> Result<(), Self::Error> {
        self.with_surveys(|surveys| {
            surveys.remove(&id);
            Ok(())
        })
    }

    async fn question_types(&self) -> Result<Vec<QuestionType>, Self::Error> {
        Ok(self.question_types.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Question;
    use crate::ItemId;

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = InMemorySurveyStore::new();
        let first = store.create_survey(&Survey::new("a")).await.unwrap();
        let second = store.create_survey(&Survey::new("b")).await.unwrap();
        assert_eq!(first.id, Some(SurveyId::new(1)));
        assert_eq!(second.id, Some(SurveyId::new(2)));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn update_and_reload() {
        let store = InMemorySurveyStore::new().with_survey(Survey::new("draft"));
        let id = SurveyId::new(1);
        let edited = Survey::new("final").with_questions(vec![Question::new(ItemId::new(1))]);

        store.update_survey(id, &edited).await.unwrap();
        let loaded = store.load_survey(id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "final");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.id, Some(id));
    }

    #[tokio::test]
    async fn update_of_missing_survey_fails() {
        let store = InMemorySurveyStore::new();
        let err = store
            .update_survey(SurveyId::new(9), &Survey::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryStoreError::NotFound(id) if id == SurveyId::new(9)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemorySurveyStore::new().with_survey(Survey::new("gone"));
        store.delete_survey(SurveyId::new(1)).await.unwrap();
        store.delete_survey(SurveyId::new(1)).await.unwrap();
        assert!(store.is_empty());
        assert!(store.load_survey(SurveyId::new(1)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reports_standard_types_by_default() {
        let store = InMemorySurveyStore::new();
        assert_eq!(store.question_types().await.unwrap().len(), 10);

        let custom = InMemorySurveyStore::new()
            .with_question_types(vec![QuestionType::new(crate::QuestionTypeId::new(1), "date")]);
        assert_eq!(custom.question_types().await.unwrap().len(), 1);
    }
}
