use survey_builder::{Question, ResponseRecord};

use crate::ReportError;

/// Write responses as CSV, one row per response.
///
/// The header holds `Response ID`, `Submitted At` and then the text of each
/// question in survey order. Questions without text are labelled by their
/// position. A response that did not answer a question leaves its cell
/// empty; answers to questions not in `questions` are ignored.
pub fn responses_to_csv(
    questions: &[Question],
    responses: &[ResponseRecord],
) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Response ID".to_string(), "Submitted At".to_string()];
    header.extend(questions.iter().enumerate().map(|(index, question)| {
        match question.text().trim() {
            "" => format!("Question {}", index + 1),
            text => text.to_string(),
        }
    }));
    writer.write_record(&header)?;

    for response in responses {
        let mut row = vec![
            response.id.to_string(),
            response.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ];
        row.extend(questions.iter().map(|question| {
            response
                .answer_to(question.id())
                .map(|answer| answer.display_value())
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    log::debug!(
        "exported {} responses to {} questions",
        responses.len(),
        questions.len()
    );
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_builder::ItemId;

    #[test]
    fn header_only_without_responses() {
        let questions = vec![
            Question::new(ItemId::new(1)).with_text("Name"),
            Question::new(ItemId::new(2)),
        ];
        let csv = responses_to_csv(&questions, &[]).unwrap();
        assert_eq!(csv, "Response ID,Submitted At,Name,Question 2\n");
    }
}
