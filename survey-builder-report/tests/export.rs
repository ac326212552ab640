//! Integration tests for report and CSV export

use example_surveys::{customer_feedback, customer_feedback_analytics, customer_feedback_responses};
use survey_builder_report::{ReportOptions, render_report, report_to_text, responses_to_csv};

#[test]
fn test_csv_has_one_row_per_response() {
    let survey = customer_feedback().unwrap();
    let responses = customer_feedback_responses(&survey);

    let csv = responses_to_csv(survey.questions(), &responses).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 1 + responses.len());
    assert_eq!(
        lines[0],
        "Response ID,Submitted At,How did you hear about us?,How satisfied are you overall?,\
         Which features do you use?,Rate each area,Anything else?"
    );
    assert_eq!(
        lines[1],
        "100,2024-05-01 09:30:00,A friend,4,Dashboard; Reports,Pricing: Fair; Support: Good,\
         \"Great, thanks\""
    );
}

#[test]
fn test_csv_leaves_missing_answers_empty() {
    let survey = customer_feedback().unwrap();
    let responses = customer_feedback_responses(&survey);

    let csv = responses_to_csv(survey.questions(), &responses).unwrap();
    let last = csv.lines().last().unwrap();
    assert_eq!(last, "102,2024-05-01 11:30:00,Social media,3,,Pricing: Fair; Support: Fair,");
}

#[test]
fn test_csv_quotes_embedded_quotes() {
    let survey = customer_feedback().unwrap();
    let responses = customer_feedback_responses(&survey);

    let csv = responses_to_csv(survey.questions(), &responses).unwrap();
    assert!(csv.contains("\"Pricing for small teams could be clearer, \"\"Pro\"\" is steep.\""));
}

#[test]
fn test_report_pages_are_numbered() {
    let survey = customer_feedback().unwrap();
    let analytics = customer_feedback_analytics(&survey);

    let pages = render_report(
        &survey.title,
        &analytics,
        &ReportOptions::new().with_lines_per_page(8),
    );

    assert!(pages.len() > 1);
    for (index, page) in pages.iter().enumerate() {
        assert_eq!(page.number, index + 1);
        assert_eq!(page.footer(), format!("Page {} of {}", index + 1, pages.len()));
        assert!(page.lines.len() <= 8);
    }
    assert_eq!(pages[0].lines[0], "Customer Feedback");
}

#[test]
fn test_report_never_strands_a_heading() {
    let survey = customer_feedback().unwrap();
    let analytics = customer_feedback_analytics(&survey);
    let headings: Vec<String> = analytics
        .iter()
        .enumerate()
        .map(|(index, question)| format!("{}. {}", index + 1, question.question_text))
        .collect();

    for lines_per_page in 3..12 {
        let pages = render_report(
            &survey.title,
            &analytics,
            &ReportOptions::new().with_lines_per_page(lines_per_page),
        );
        for page in &pages {
            let last = page.lines.last().unwrap();
            assert!(!headings.contains(last), "heading {last:?} ends a page");
        }
        let rendered: usize = pages
            .iter()
            .flat_map(|page| &page.lines)
            .filter(|line| headings.contains(line))
            .count();
        assert_eq!(rendered, headings.len());
    }
}

#[test]
fn test_report_respects_line_width() {
    let survey = customer_feedback().unwrap();
    let analytics = customer_feedback_analytics(&survey);

    let pages = render_report(&survey.title, &analytics, &ReportOptions::new().with_width(24));
    for line in pages.iter().flat_map(|page| &page.lines) {
        assert!(line.chars().count() <= 24, "{line:?} is too long");
    }
}

#[test]
fn test_report_text_separates_pages() {
    let survey = customer_feedback().unwrap();
    let analytics = customer_feedback_analytics(&survey);

    let pages = render_report(&survey.title, &analytics, &ReportOptions::new().with_lines_per_page(10));
    let text = report_to_text(&pages);
    assert_eq!(text.matches('\u{c}').count(), pages.len() - 1);
    assert!(text.ends_with(&format!("Page {0} of {0}", pages.len())));
}
