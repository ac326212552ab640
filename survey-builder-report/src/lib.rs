//! # survey-builder-report
//!
//! Export helpers for survey results.
//!
//! - [`render_report`] lays analytics out as numbered pages of plain text
//! - [`responses_to_csv`] writes individual responses as CSV
//!
//! ```rust,ignore
//! use survey_builder_report::{ReportOptions, render_report};
//!
//! let pages = render_report("Customer Feedback", &analytics, &ReportOptions::new().with_width(60));
//! for page in &pages {
//!     println!("{}", page.to_text());
//! }
//! ```

mod csv_export;
mod error;
mod report;

pub use csv_export::responses_to_csv;
pub use error::ReportError;
pub use report::{ReportOptions, ReportPage, render_report, report_to_text};
