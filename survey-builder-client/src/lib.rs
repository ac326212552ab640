//! # survey-builder-client
//!
//! Async client for the survey persistence and analytics REST APIs.
//!
//! [`ApiClient`] implements [`SurveyStore`](survey_builder::SurveyStore) so
//! an editing session can save to the server the same way it saves to the
//! in-memory store. Analytics and responses are paginated and fetched
//! through a [`PageLoader`], which keeps at most one request in flight and
//! drops results that arrive after it was cancelled.
//!
//! ```rust,ignore
//! use survey_builder::SurveyStore;
//! use survey_builder_client::{ApiClient, ClientConfig};
//!
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//! for survey in client.list_surveys().await? {
//!     println!("{}: {}", survey.id, survey.title);
//! }
//! ```

mod client;
mod config;
mod error;
mod pages;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use pages::{LoadOutcome, PageLoader, QuestionAnalyticsPages, ResponsePages};
