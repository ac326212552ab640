//! Core types for the survey-builder crate.
//!
//! This crate provides the foundational types for editing surveys:
//! - `Question` and `QuestionKind` - Individual questions and their type-specific metadata
//! - `QuestionTypeRegistry` - The question types offered by the lookup service
//! - `Survey` and the wire records exchanged with the persistence API
//! - `Page`, `QuestionAnalytics` and friends - Read-only analytics payloads
//! - `SurveyStore` and `PageSource` traits - For implementing collaborators

mod id;
pub use id::{IdGenerator, ItemId, QuestionTypeId, SurveyId};

mod metadata;
pub use metadata::{
    Choice, ChoiceList, ChoiceMetadata, GridMetadata, OptionList, ScaleMetadata, TextMetadata,
};

mod question_type;
pub use question_type::{
    MetadataFamily, QuestionType, QuestionTypeName, QuestionTypeRegistry, default_metadata,
};

mod question;
pub use question::{Question, QuestionKind, QuestionRecord};

mod survey;
pub use survey::{Survey, SurveyRecord, SurveySummary};

mod analytics;
pub use analytics::{
    AnalyticsSummary, Answer, DashboardStats, GridRowStat, OptionStat, Page, QuestionAnalytics,
    ResponseRecord, ScaleBucket,
};

mod metrics;
pub use metrics::{METRIC_DESCRIPTORS, MetricCard, MetricDescriptor, MetricKey, metric_cards};

mod error;
pub use error::SurveyError;

mod traits;
pub use traits::{PageSource, SurveyStore};
