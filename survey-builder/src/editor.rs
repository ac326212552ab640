//! The editing surface: one survey, one owner, one action at a time.
//!
//! `SurveyEditor` owns the survey being edited together with the id
//! generator, the question-type registry, focus state and the drag
//! controller. User interface events are translated into [`EditorAction`]s
//! and applied in order; each action replaces the question list wholesale,
//! so observers never see a partially applied edit.

use crate::collection::{self, position};
use crate::options;
use crate::{
    DragReorder, IdGenerator, ItemId, MetadataFamily, OptionList, Question, QuestionKind,
    QuestionTypeId, QuestionTypeRegistry, Survey, SurveyError,
};

/// Whether a question card is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// Shown as a summary; can be dragged.
    Collapsed,
    /// Open for editing; cannot be dragged.
    Focused,
}

/// A single edit coming from the user interface.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    AddQuestion,
    DuplicateQuestion(ItemId),
    DeleteQuestion(ItemId),
    SetText {
        question: ItemId,
        text: String,
    },
    SetType {
        question: ItemId,
        type_id: QuestionTypeId,
    },
    SetRequired {
        question: ItemId,
        required: bool,
    },
    /// Replace the metadata wholesale.
    SetMetadata {
        question: ItemId,
        kind: QuestionKind,
    },
    AddOption {
        question: ItemId,
        list: OptionList,
    },
    DuplicateOption {
        question: ItemId,
        list: OptionList,
        option: ItemId,
    },
    RemoveOption {
        question: ItemId,
        list: OptionList,
        option: ItemId,
    },
    SetOptionText {
        question: ItemId,
        list: OptionList,
        option: ItemId,
        text: String,
    },
    MoveOption {
        question: ItemId,
        list: OptionList,
        from: usize,
        to: usize,
    },
    /// Open a question for editing, collapsing any other.
    Focus(ItemId),
    /// Collapse every question.
    Blur,
    DragStart(usize),
    DragOver(usize),
    Drop(usize),
    DragEnd,
}

/// Edits one survey.
#[derive(Debug)]
pub struct SurveyEditor {
    survey: Survey,
    registry: QuestionTypeRegistry,
    ids: IdGenerator,
    focused: Option<ItemId>,
    drag: DragReorder,
}

impl SurveyEditor {
    /// Start editing a new, empty survey.
    pub fn new(title: impl Into<String>, registry: QuestionTypeRegistry) -> Self {
        Self::open(Survey::new(title), registry)
    }

    /// Start editing an existing survey.
    ///
    /// Fresh ids are minted above every id already present in `survey`.
    pub fn open(survey: Survey, registry: QuestionTypeRegistry) -> Self {
        let ids = IdGenerator::starting_after(survey.item_ids());
        Self {
            survey,
            registry,
            ids,
            focused: None,
            drag: DragReorder::new(),
        }
    }

    /// The survey as edited so far.
    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// The questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.survey.questions
    }

    /// Find a question by id.
    pub fn question(&self, id: ItemId) -> Option<&Question> {
        self.survey.question(id)
    }

    /// The question-type registry used for type changes.
    pub fn registry(&self) -> &QuestionTypeRegistry {
        &self.registry
    }

    /// The type name the registry reports for a question.
    pub fn type_name_of(&self, id: ItemId) -> Option<&str> {
        let question = self.question(id)?;
        self.registry.name_of(question.type_id())
    }

    /// The question currently open for editing.
    pub fn focused(&self) -> Option<ItemId> {
        self.focused
    }

    /// Whether a question is open for editing.
    pub fn focus_state(&self, id: ItemId) -> FocusState {
        if self.focused == Some(id) {
            FocusState::Focused
        } else {
            FocusState::Collapsed
        }
    }

    /// Whether a question may be picked up for reordering.
    pub fn can_drag(&self, id: ItemId) -> bool {
        self.question(id).is_some() && self.focus_state(id) == FocusState::Collapsed
    }

    /// The drag controller state.
    pub fn drag(&self) -> &DragReorder {
        &self.drag
    }

    /// Set the survey title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.survey.title = title.into();
    }

    /// Set the survey description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.survey.description = description.into();
    }

    /// Append a blank question and return its id.
    pub fn add_question(&mut self) -> ItemId {
        let question = Question::new(self.ids.next_id());
        let id = question.id();
        self.replace(collection::append_question(self.questions(), question));
        id
    }

    /// Finish editing and hand the survey over.
    pub fn into_survey(self) -> Survey {
        self.survey
    }

    /// Apply one edit.
    ///
    /// Removing the last option, row or column of a question fails, as does
    /// metadata whose shape does not match the question's type. The survey is
    /// unchanged in both cases.
    pub fn apply(&mut self, action: EditorAction) -> Result<(), SurveyError> {
        match action {
            EditorAction::AddQuestion => {
                self.add_question();
            }
            EditorAction::DuplicateQuestion(id) => {
                self.replace(collection::duplicate_question(self.questions(), id, &self.ids));
            }
            EditorAction::DeleteQuestion(id) => {
                if self.focused == Some(id) {
                    self.focused = None;
                }
                self.replace(collection::delete_question(self.questions(), id));
            }
            EditorAction::SetText { question, text } => {
                self.replace(collection::update_question_text(
                    self.questions(),
                    question,
                    &text,
                ));
            }
            EditorAction::SetType { question, type_id } => self.set_type(question, type_id)?,
            EditorAction::SetRequired { question, required } => {
                self.replace(collection::update_question_required(
                    self.questions(),
                    question,
                    required,
                ));
            }
            EditorAction::SetMetadata { question, kind } => {
                self.replace(collection::update_question_metadata(
                    self.questions(),
                    question,
                    kind,
                    &self.registry,
                )?);
            }
            EditorAction::AddOption { question, list } => {
                self.edit_metadata(question, |kind, ids| {
                    Ok(options::add_option(kind, list, list.default_label(), ids))
                })?;
            }
            EditorAction::DuplicateOption {
                question,
                list,
                option,
            } => {
                self.edit_metadata(question, |kind, ids| {
                    Ok(options::duplicate_option(kind, option, list, ids))
                })?;
            }
            EditorAction::RemoveOption {
                question,
                list,
                option,
            } => {
                self.edit_metadata(question, |kind, _| {
                    options::remove_option(kind, option, list)
                })?;
            }
            EditorAction::SetOptionText {
                question,
                list,
                option,
                text,
            } => {
                self.edit_metadata(question, |kind, _| {
                    Ok(options::update_option_text(kind, option, &text, list))
                })?;
            }
            EditorAction::MoveOption {
                question,
                list,
                from,
                to,
            } => {
                self.edit_metadata(question, |kind, _| {
                    Ok(options::move_option(kind, list, from, to))
                })?;
            }
            EditorAction::Focus(id) => {
                if self.question(id).is_some() {
                    let dragged = self.drag.dragged_index().and_then(|i| self.questions().get(i));
                    if dragged.is_some_and(|q| q.id() == id) {
                        log::trace!("focus: ending drag of question {id}");
                        self.drag.drag_end();
                    }
                    self.focused = Some(id);
                } else {
                    log::trace!("focus: no question {id}");
                }
            }
            EditorAction::Blur => self.focused = None,
            EditorAction::DragStart(index) => self.drag_start(index),
            EditorAction::DragOver(index) => self.drag.drag_over(index),
            EditorAction::Drop(index) => {
                if let Some(reordered) = self.drag.drop_on(index, &self.survey.questions) {
                    self.replace(reordered);
                }
            }
            EditorAction::DragEnd => self.drag.drag_end(),
        }
        Ok(())
    }

    fn set_type(&mut self, question: ItemId, type_id: QuestionTypeId) -> Result<(), SurveyError> {
        let retyped =
            collection::update_question_type(self.questions(), question, type_id, &self.registry);
        self.replace(retyped);

        // A choice or grid question starts out with one entry per list.
        let Some(kind) = self.question(question).map(|q| q.kind().clone()) else {
            return Ok(());
        };
        let lists: &[OptionList] = match kind.family() {
            MetadataFamily::Choice => &[OptionList::Options],
            MetadataFamily::Grid => &[OptionList::Rows, OptionList::Columns],
            _ => &[],
        };
        let mut seeded = kind.clone();
        for &list in lists {
            if seeded.choice_list(list).is_some_and(|choices| choices.is_empty()) {
                seeded = options::add_option(&seeded, list, list.default_label(), &self.ids);
            }
        }
        if seeded != kind {
            self.replace(collection::update_question_metadata(
                self.questions(),
                question,
                seeded,
                &self.registry,
            )?);
        }
        Ok(())
    }

    fn drag_start(&mut self, index: usize) {
        match self.questions().get(index) {
            Some(question) if self.can_drag(question.id()) => self.drag.drag_start(index),
            Some(question) => log::trace!("drag: question {} is focused", question.id()),
            None => log::trace!("drag: no question at {index}"),
        }
    }

    fn edit_metadata(
        &mut self,
        question: ItemId,
        change: impl FnOnce(&QuestionKind, &IdGenerator) -> Result<QuestionKind, SurveyError>,
    ) -> Result<(), SurveyError> {
        let Some(index) = position(self.questions(), question) else {
            log::trace!("metadata: no question {question}");
            return Ok(());
        };
        let kind = change(self.questions()[index].kind(), &self.ids)?;
        self.replace(collection::update_question_metadata(
            self.questions(),
            question,
            kind,
            &self.registry,
        )?);
        Ok(())
    }

    fn replace(&mut self, questions: Vec<Question>) {
        self.survey.questions = questions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuestionTypeName;

    fn editor() -> SurveyEditor {
        SurveyEditor::new("Test", QuestionTypeRegistry::standard())
    }

    fn type_id(editor: &SurveyEditor, name: QuestionTypeName) -> QuestionTypeId {
        editor.registry().id_of(name).unwrap()
    }

    #[test]
    fn choosing_a_choice_type_seeds_one_option() {
        let mut editor = editor();
        let id = editor.add_question();
        let dropdown = type_id(&editor, QuestionTypeName::Dropdown);
        editor
            .apply(EditorAction::SetType {
                question: id,
                type_id: dropdown,
            })
            .unwrap();

        assert_eq!(editor.type_name_of(id), Some("dropdown"));
        let options = &editor.question(id).unwrap().kind().choices().unwrap().options;
        assert_eq!(options.texts().collect::<Vec<_>>(), ["Option 1"]);
    }

    #[test]
    fn choosing_a_grid_type_seeds_a_row_and_a_column() {
        let mut editor = editor();
        let id = editor.add_question();
        let grid = type_id(&editor, QuestionTypeName::CheckboxGrid);
        editor
            .apply(EditorAction::SetType {
                question: id,
                type_id: grid,
            })
            .unwrap();

        let metadata = editor.question(id).unwrap().kind().grid().unwrap();
        assert_eq!(metadata.rows.texts().collect::<Vec<_>>(), ["Row 1"]);
        assert_eq!(metadata.columns.texts().collect::<Vec<_>>(), ["Column 1"]);
    }

    #[test]
    fn focus_is_exclusive_and_blocks_dragging() {
        let mut editor = editor();
        let a = editor.add_question();
        let b = editor.add_question();

        editor.apply(EditorAction::Focus(a)).unwrap();
        assert_eq!(editor.focus_state(a), FocusState::Focused);
        assert!(!editor.can_drag(a));
        assert!(editor.can_drag(b));

        editor.apply(EditorAction::Focus(b)).unwrap();
        assert_eq!(editor.focus_state(a), FocusState::Collapsed);
        assert_eq!(editor.focused(), Some(b));

        editor.apply(EditorAction::DragStart(1)).unwrap();
        assert!(!editor.drag().is_dragging());

        editor.apply(EditorAction::Blur).unwrap();
        editor.apply(EditorAction::DragStart(1)).unwrap();
        assert!(editor.drag().is_dragging());
    }

    #[test]
    fn deleting_the_focused_question_clears_focus() {
        let mut editor = editor();
        let id = editor.add_question();
        editor.apply(EditorAction::Focus(id)).unwrap();
        editor.apply(EditorAction::DeleteQuestion(id)).unwrap();
        assert_eq!(editor.focused(), None);
        assert!(editor.questions().is_empty());
    }

    #[test]
    fn failed_removal_leaves_the_survey_unchanged() {
        let mut editor = editor();
        let id = editor.add_question();
        let choice = type_id(&editor, QuestionTypeName::MultipleChoice);
        editor
            .apply(EditorAction::SetType {
                question: id,
                type_id: choice,
            })
            .unwrap();
        let before = editor.survey().clone();
        let only = before.questions()[0].kind().choices().unwrap().options.as_slice()[0].id;

        let result = editor.apply(EditorAction::RemoveOption {
            question: id,
            list: OptionList::Options,
            option: only,
        });
        assert!(matches!(result, Err(SurveyError::LastOption { .. })));
        assert_eq!(editor.survey(), &before);
    }

    #[test]
    fn drag_gesture_through_actions() {
        let mut editor = editor();
        let a = editor.add_question();
        let b = editor.add_question();
        let c = editor.add_question();

        editor.apply(EditorAction::DragStart(0)).unwrap();
        editor.apply(EditorAction::DragOver(2)).unwrap();
        editor.apply(EditorAction::Drop(2)).unwrap();
        editor.apply(EditorAction::DragEnd).unwrap();

        let order: Vec<_> = editor.questions().iter().map(Question::id).collect();
        assert_eq!(order, [b, c, a]);
    }

    #[test]
    fn focusing_the_dragged_question_ends_the_drag() {
        let mut editor = editor();
        let a = editor.add_question();
        let b = editor.add_question();

        editor.apply(EditorAction::DragStart(0)).unwrap();
        editor.apply(EditorAction::Focus(b)).unwrap();
        assert!(editor.drag().is_dragging());

        editor.apply(EditorAction::Focus(a)).unwrap();
        assert!(!editor.drag().is_dragging());
        editor.apply(EditorAction::Drop(1)).unwrap();

        let order: Vec<_> = editor.questions().iter().map(Question::id).collect();
        assert_eq!(order, [a, b]);
        assert_eq!(editor.focused(), Some(a));
    }

    #[test]
    fn opened_surveys_mint_ids_above_existing_ones() {
        let survey = Survey::new("Loaded").with_questions(vec![Question::new(ItemId::new(50))]);
        let mut editor = SurveyEditor::open(survey, QuestionTypeRegistry::standard());
        let id = editor.add_question();
        assert!(id > ItemId::new(50));
    }
}
