//! A registration form made of free-text, date and choice questions.

use survey_builder::{
    OptionList, QuestionTypeName, QuestionTypeRegistry, Survey, SurveyEditor, SurveyError,
};

use crate::authoring::{ask, fill};

/// Sign-up form for a one-day meetup.
pub fn event_registration() -> Result<Survey, SurveyError> {
    let mut editor = SurveyEditor::new("Meetup Registration", QuestionTypeRegistry::standard());
    editor.set_description("Reserve your seat.");

    ask(&mut editor, "Full name", QuestionTypeName::ShortAnswer, true)?;
    ask(&mut editor, "Which day suits you?", QuestionTypeName::Date, true)?;
    ask(&mut editor, "Arrival time", QuestionTypeName::Time, false)?;

    let ticket = ask(&mut editor, "Ticket type", QuestionTypeName::MultipleChoice, true)?;
    fill(&mut editor, ticket, OptionList::Options, &["Standard", "Student", "Speaker"])?;

    let workshops = ask(
        &mut editor,
        "Workshops to attend",
        QuestionTypeName::CheckboxGrid,
        false,
    )?;
    fill(&mut editor, workshops, OptionList::Rows, &["Morning", "Afternoon"])?;
    fill(&mut editor, workshops, OptionList::Columns, &["Rust", "Testing"])?;

    Ok(editor.into_survey())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_has_ticket_options() {
        let survey = event_registration().unwrap();
        let ticket = &survey.questions[3];
        let options = ticket.kind().choice_list(OptionList::Options).unwrap();
        assert_eq!(options.texts().collect::<Vec<_>>(), ["Standard", "Student", "Speaker"]);
        assert!(ticket.is_required());
    }
}
