use serde::{Deserialize, Serialize};

use crate::{ItemId, Question, QuestionRecord, QuestionTypeRegistry, SurveyError, SurveyId};

/// The top-level structure holding a survey's ordered questions.
///
/// The survey is presentation-agnostic: the editor mutates its questions,
/// the persistence collaborator saves and loads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Survey {
    /// Server-assigned id, `None` until the survey is first saved.
    pub id: Option<SurveyId>,

    pub title: String,

    pub description: String,

    /// All questions in display order.
    pub questions: Vec<Question>,
}

impl Survey {
    /// Create an unsaved survey with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            questions: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the questions.
    pub fn with_questions(mut self, questions: Vec<Question>) -> Self {
        self.questions = questions;
        self
    }

    /// Set the server-assigned id.
    pub fn with_id(mut self, id: SurveyId) -> Self {
        self.id = Some(id);
        self
    }

    /// Get the questions.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Find a question by id.
    pub fn question(&self, id: ItemId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Check if the survey has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Every question, option, row and column id in the survey.
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.questions.iter().flat_map(Question::item_ids)
    }

    /// Convert to the wire format of the persistence API.
    pub fn to_record(&self) -> Result<SurveyRecord, SurveyError> {
        Ok(SurveyRecord {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self
                .questions
                .iter()
                .map(Question::to_record)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Rebuild a survey from the wire format.
    pub fn from_record(record: SurveyRecord, registry: &QuestionTypeRegistry) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            questions: record
                .questions
                .into_iter()
                .map(|q| Question::from_record(q, registry))
                .collect(),
        }
    }
}

/// A survey as exchanged with the persistence API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SurveyId>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
}

/// One row of the survey list on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummary {
    pub id: SurveyId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub response_count: u64,

    #[serde(default)]
    pub is_active: bool,
}
