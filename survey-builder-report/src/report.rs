//! Plain-text analytics reports laid out on fixed-size pages.

use survey_builder::{AnalyticsSummary, OptionStat, QuestionAnalytics, ScaleBucket};

/// Options for report layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Maximum characters per line.
    pub width: usize,
    /// Lines per page, not counting the footer.
    pub lines_per_page: usize,
    /// Free-text answers shown per question.
    pub max_samples: usize,
    /// Length of the longest bar in a scale distribution.
    pub bar_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportOptions {
    pub const MIN_WIDTH: usize = 20;

    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            width: 80,
            lines_per_page: 50,
            max_samples: 5,
            bar_width: 20,
        }
    }

    /// Set the line width. Widths below [`Self::MIN_WIDTH`] are raised to it.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(Self::MIN_WIDTH);
        self
    }

    /// Set the number of lines per page, at least 2.
    pub fn with_lines_per_page(mut self, lines: usize) -> Self {
        self.lines_per_page = lines.max(2);
        self
    }

    /// Set how many free-text answers to show per question.
    pub fn with_max_samples(mut self, samples: usize) -> Self {
        self.max_samples = samples;
        self
    }

    /// Set the length of the longest scale bar.
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }
}

/// One page of a rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPage {
    /// 1-based page number.
    pub number: usize,
    /// Number of pages in the report.
    pub total: usize,
    pub lines: Vec<String>,
}

impl ReportPage {
    /// The page footer, e.g. `Page 2 of 5`.
    pub fn footer(&self) -> String {
        format!("Page {} of {}", self.number, self.total)
    }

    /// The page body followed by a blank line and the footer.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push_str("\n\n");
        text.push_str(&self.footer());
        text
    }
}

/// Join rendered pages, separated by form feeds.
pub fn report_to_text(pages: &[ReportPage]) -> String {
    pages
        .iter()
        .map(ReportPage::to_text)
        .collect::<Vec<_>>()
        .join("\n\u{c}\n")
}

/// Lay out a survey's analytics as pages of text.
///
/// Every question starts with a numbered heading followed by a summary line
/// and its statistics. A heading is never left alone at the bottom of a
/// page. The result always has at least one page.
pub fn render_report(
    survey_title: &str,
    analytics: &[QuestionAnalytics],
    options: &ReportOptions,
) -> Vec<ReportPage> {
    let mut blocks = vec![title_block(survey_title, analytics.len(), options)];
    if analytics.is_empty() {
        blocks.push(Block {
            lines: vec!["No questions to report.".to_string()],
            keep: 1,
        });
    }
    blocks.extend(
        analytics
            .iter()
            .enumerate()
            .map(|(index, question)| question_block(index + 1, question, options)),
    );

    let pages = paginate(blocks, options.lines_per_page);
    let total = pages.len();
    log::debug!("report {survey_title:?} laid out on {total} pages");

    pages
        .into_iter()
        .enumerate()
        .map(|(index, lines)| ReportPage {
            number: index + 1,
            total,
            lines,
        })
        .collect()
}

/// Lines of one report section. The first `keep` lines share a page.
struct Block {
    lines: Vec<String>,
    keep: usize,
}

fn title_block(title: &str, questions: usize, options: &ReportOptions) -> Block {
    let mut lines = wrap(title, options.width, 0);
    let underline = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    lines.push("=".repeat(underline.max(1)));
    let keep = lines.len();
    lines.push(format!("Questions: {questions}"));
    Block { lines, keep }
}

fn question_block(number: usize, question: &QuestionAnalytics, options: &ReportOptions) -> Block {
    let text = match question.question_text.trim() {
        "" => "(untitled question)",
        text => text,
    };
    let mut lines = wrap(&format!("{number}. {text}"), options.width, 0);
    let keep = lines.len() + 1;

    let type_name = match question.type_name.as_str() {
        "" => "unknown type",
        name => name,
    };
    lines.extend(wrap(
        &format!("{type_name} | {} responses", question.total_responses),
        options.width,
        3,
    ));

    match &question.summary {
        AnalyticsSummary::Choice { options: stats } if stats.is_empty() => {
            lines.push("   No options.".to_string());
        }
        AnalyticsSummary::Choice { options: stats } => {
            lines.extend(option_lines(stats, options.width, 3));
        }
        AnalyticsSummary::Scale {
            distribution,
            average,
        } => {
            if let Some(average) = average {
                lines.push(format!("   Average: {average:.2}"));
            }
            lines.extend(scale_lines(distribution, options));
        }
        AnalyticsSummary::Grid { rows } => {
            for row in rows {
                lines.extend(wrap(&format!("{}:", row.row), options.width, 3));
                lines.extend(option_lines(&row.columns, options.width, 5));
            }
        }
        AnalyticsSummary::Text { samples } if samples.is_empty() => {
            lines.push("   No answers yet.".to_string());
        }
        AnalyticsSummary::Text { samples } => {
            for sample in samples.iter().take(options.max_samples) {
                lines.extend(wrap(&format!("\"{sample}\""), options.width, 3));
            }
            if samples.len() > options.max_samples {
                lines.push(format!(
                    "   ... and {} more",
                    samples.len() - options.max_samples
                ));
            }
        }
        AnalyticsSummary::Empty => lines.push("   No statistics available.".to_string()),
    }

    Block { lines, keep }
}

fn option_lines(stats: &[OptionStat], width: usize, indent: usize) -> Vec<String> {
    stats
        .iter()
        .flat_map(|stat| {
            wrap(
                &format!("- {}: {} ({:.1}%)", stat.text, stat.count, stat.percentage),
                width,
                indent,
            )
        })
        .collect()
}

fn scale_lines(distribution: &[ScaleBucket], options: &ReportOptions) -> Vec<String> {
    let most = distribution.iter().map(|b| b.count).max().unwrap_or(0);
    distribution
        .iter()
        .flat_map(|bucket| {
            let bar = if most == 0 {
                0
            } else {
                (bucket.count as usize * options.bar_width).div_ceil(most as usize)
            };
            let line = format!("   {:>3} | {} {}", bucket.value, "#".repeat(bar), bucket.count);
            if line.chars().count() <= options.width {
                vec![line]
            } else {
                wrap(&line, options.width, 3)
            }
        })
        .collect()
}

fn paginate(blocks: Vec<Block>, lines_per_page: usize) -> Vec<Vec<String>> {
    let per_page = lines_per_page.max(2);
    let mut pages = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for block in blocks {
        let gap = usize::from(!current.is_empty());
        let keep = block.keep.min(block.lines.len()).min(per_page);
        if !current.is_empty() && current.len() + gap + keep > per_page {
            pages.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(String::new());
        }
        for line in block.lines {
            if current.len() == per_page {
                pages.push(std::mem::take(&mut current));
            }
            current.push(line);
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

/// Word-wrap `text` to `width` characters, indenting every line.
///
/// Words longer than a line are split.
fn wrap(text: &str, width: usize, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let room = width.saturating_sub(indent).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(room) {
            if current_len > 0 && current_len + 1 + piece.len() > room {
                lines.push(format!("{pad}{current}"));
                current.clear();
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(piece);
            current_len += piece.len();
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(format!("{pad}{current}"));
    }
    lines
}
