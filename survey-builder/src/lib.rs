//! # survey-builder
//!
//! Edit surveys as ordered lists of typed questions. Presentation-agnostic.
//!
//! This crate holds the editing model behind a survey builder: the question
//! list operations, option list operations, focus handling and drag
//! reordering. Rendering is left to whatever front end drives the
//! [`SurveyEditor`].
//!
//! ## Usage
//!
//! ```rust
//! use survey_builder::{EditorAction, QuestionTypeName, QuestionTypeRegistry, SurveyEditor};
//!
//! let registry = QuestionTypeRegistry::standard();
//! let dropdown = registry.id_of(QuestionTypeName::Dropdown).unwrap();
//!
//! let mut editor = SurveyEditor::new("Lunch order", registry);
//! let question = editor.add_question();
//! editor.apply(EditorAction::SetText {
//!     question,
//!     text: "Main course?".to_string(),
//! }).unwrap();
//! editor.apply(EditorAction::SetType { question, type_id: dropdown }).unwrap();
//!
//! let survey = editor.into_survey();
//! assert_eq!(survey.questions[0].text(), "Main course?");
//! ```
//!
//! ## Stores
//!
//! Persistence goes through the [`SurveyStore`] trait:
//! - `survey-builder-client` - the REST persistence and analytics API
//! - [`InMemorySurveyStore`] - an in-process store for tests

// Re-export all types from survey-builder-types
pub use survey_builder_types::*;

pub mod collection;
pub mod options;

mod drag;
pub use drag::DragReorder;

mod editor;
pub use editor::{EditorAction, FocusState, SurveyEditor};

// In-memory store for tests and offline use
mod memory_store;
pub use memory_store::{InMemorySurveyStore, MemoryStoreError};
