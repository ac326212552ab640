//! A short customer feedback form touching every metadata shape, with
//! matching analytics and responses.

use chrono::{DateTime, Utc};
use serde_json::json;
use survey_builder::{
    AnalyticsSummary, Answer, EditorAction, GridRowStat, OptionList, OptionStat, Question,
    QuestionAnalytics, QuestionKind, QuestionTypeName, QuestionTypeRegistry, ResponseRecord,
    ScaleMetadata, Survey, SurveyEditor, SurveyError,
};

use crate::authoring::{ask, fill};

/// Five questions: dropdown, linear scale, checkboxes, grid and paragraph.
pub fn customer_feedback() -> Result<Survey, SurveyError> {
    let mut editor = SurveyEditor::new("Customer Feedback", QuestionTypeRegistry::standard());
    editor.set_description("Tell us how we are doing.");

    let source = ask(&mut editor, "How did you hear about us?", QuestionTypeName::Dropdown, true)?;
    fill(
        &mut editor,
        source,
        OptionList::Options,
        &["Search engine", "A friend", "Social media"],
    )?;

    let satisfaction = ask(
        &mut editor,
        "How satisfied are you overall?",
        QuestionTypeName::LinearScale,
        true,
    )?;
    editor.apply(EditorAction::SetMetadata {
        question: satisfaction,
        kind: QuestionKind::LinearScale(ScaleMetadata {
            min_label: "Not at all".to_string(),
            max_label: "Very".to_string(),
            ..ScaleMetadata::default()
        }),
    })?;

    let features = ask(
        &mut editor,
        "Which features do you use?",
        QuestionTypeName::Checkboxes,
        false,
    )?;
    fill(
        &mut editor,
        features,
        OptionList::Options,
        &["Dashboard", "Reports", "Exports"],
    )?;

    let areas = ask(
        &mut editor,
        "Rate each area",
        QuestionTypeName::MultipleChoiceGrid,
        true,
    )?;
    fill(&mut editor, areas, OptionList::Rows, &["Support", "Pricing"])?;
    fill(&mut editor, areas, OptionList::Columns, &["Poor", "Fair", "Good"])?;

    ask(&mut editor, "Anything else?", QuestionTypeName::Paragraph, false)?;

    Ok(editor.into_survey())
}

/// Statistics for [`customer_feedback`], as the analytics service reports them.
pub fn customer_feedback_analytics(survey: &Survey) -> Vec<QuestionAnalytics> {
    survey
        .questions()
        .iter()
        .map(|question| {
            let summary = match question.type_name() {
                Some(QuestionTypeName::Dropdown) => {
                    AnalyticsSummary::choice_from_counts(zip_counts(question, &[12, 5, 3]))
                }
                Some(QuestionTypeName::Checkboxes) => {
                    AnalyticsSummary::choice_from_counts(zip_counts(question, &[15, 9, 2]))
                }
                Some(QuestionTypeName::LinearScale) => {
                    AnalyticsSummary::scale_from_counts([(1, 1), (2, 0), (3, 4), (4, 8), (5, 7)])
                }
                Some(QuestionTypeName::MultipleChoiceGrid) => AnalyticsSummary::Grid {
                    rows: vec![
                        GridRowStat {
                            row: "Support".to_string(),
                            columns: OptionStat::from_counts([("Poor", 2), ("Fair", 6), ("Good", 12)]),
                        },
                        GridRowStat {
                            row: "Pricing".to_string(),
                            columns: OptionStat::from_counts([("Poor", 7), ("Fair", 9), ("Good", 4)]),
                        },
                    ],
                },
                Some(QuestionTypeName::Paragraph) => AnalyticsSummary::Text {
                    samples: vec![
                        "The new export screen saved me an hour every week.".to_string(),
                        "Pricing for small teams could be clearer.".to_string(),
                    ],
                },
                _ => AnalyticsSummary::Empty,
            };
            QuestionAnalytics {
                question_id: question.id(),
                question_text: question.text().to_string(),
                type_name: question
                    .type_name()
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                total_responses: 20,
                summary,
            }
        })
        .collect()
}

/// Three submitted responses to [`customer_feedback`]. The last one skips
/// the optional questions.
pub fn customer_feedback_responses(survey: &Survey) -> Vec<ResponseRecord> {
    let questions = survey.questions();
    let answers = [
        vec![
            json!("A friend"),
            json!(4),
            json!(["Dashboard", "Reports"]),
            json!({"Support": "Good", "Pricing": "Fair"}),
            json!("Great, thanks"),
        ],
        vec![
            json!("Search engine"),
            json!(5),
            json!(["Exports"]),
            json!({"Support": "Good", "Pricing": "Poor"}),
            json!("Pricing for small teams could be clearer, \"Pro\" is steep."),
        ],
        vec![
            json!("Social media"),
            json!(3),
            serde_json::Value::Null,
            json!({"Support": "Fair", "Pricing": "Fair"}),
            serde_json::Value::Null,
        ],
    ];

    answers
        .into_iter()
        .enumerate()
        .map(|(index, values)| ResponseRecord {
            id: 100 + index as u64,
            submitted_at: submitted_at(1_714_555_800 + 3_600 * index as i64),
            answers: questions
                .iter()
                .zip(values)
                .filter(|(_, value)| !value.is_null())
                .map(|(question, value)| Answer {
                    question_id: question.id(),
                    question_text: question.text().to_string(),
                    value,
                })
                .collect(),
        })
        .collect()
}

fn zip_counts(question: &Question, counts: &[u64]) -> Vec<(String, u64)> {
    question
        .kind()
        .choice_list(OptionList::Options)
        .map(|options| {
            options
                .texts()
                .zip(counts.iter().copied())
                .map(|(text, count)| (text.to_string(), count))
                .collect()
        })
        .unwrap_or_default()
}

fn submitted_at(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_question() {
        let survey = customer_feedback().unwrap();
        assert_eq!(survey.len(), 5);
        assert_eq!(survey.title, "Customer Feedback");

        let grid = survey.questions[3].kind().grid().unwrap();
        assert_eq!(grid.rows.texts().collect::<Vec<_>>(), ["Support", "Pricing"]);
        assert_eq!(grid.columns.len(), 3);

        let scale = survey.questions[1].kind().scale().unwrap();
        assert_eq!(scale.max_label, "Very");
    }

    #[test]
    fn ids_are_unique_across_the_survey() {
        let survey = customer_feedback().unwrap();
        let mut ids: Vec<_> = survey.item_ids().collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn analytics_cover_every_question() {
        let survey = customer_feedback().unwrap();
        let analytics = customer_feedback_analytics(&survey);
        assert_eq!(analytics.len(), survey.len());
        assert!(analytics.iter().all(|a| a.summary != AnalyticsSummary::Empty));
    }
}
