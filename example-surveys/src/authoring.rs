use survey_builder::{
    EditorAction, ItemId, OptionList, QuestionTypeName, SurveyEditor, SurveyError,
};

/// Add a question with its text, type and required flag set.
pub(crate) fn ask(
    editor: &mut SurveyEditor,
    text: &str,
    type_name: QuestionTypeName,
    required: bool,
) -> Result<ItemId, SurveyError> {
    let question = editor.add_question();
    let type_id = editor
        .registry()
        .id_of(type_name)
        .ok_or_else(|| SurveyError::UnknownQuestionType(type_name.to_string()))?;
    editor.apply(EditorAction::SetText {
        question,
        text: text.to_string(),
    })?;
    editor.apply(EditorAction::SetType { question, type_id })?;
    editor.apply(EditorAction::SetRequired { question, required })?;
    Ok(question)
}

/// Make a question's list read `texts`, adding entries as needed.
pub(crate) fn fill(
    editor: &mut SurveyEditor,
    question: ItemId,
    list: OptionList,
    texts: &[&str],
) -> Result<(), SurveyError> {
    for (index, text) in texts.iter().enumerate() {
        if entry(editor, question, list, index).is_none() {
            editor.apply(EditorAction::AddOption { question, list })?;
        }
        if let Some(option) = entry(editor, question, list, index) {
            editor.apply(EditorAction::SetOptionText {
                question,
                list,
                option,
                text: text.to_string(),
            })?;
        }
    }
    Ok(())
}

fn entry(editor: &SurveyEditor, question: ItemId, list: OptionList, index: usize) -> Option<ItemId> {
    editor
        .question(question)?
        .kind()
        .choice_list(list)?
        .as_slice()
        .get(index)
        .map(|choice| choice.id)
}
