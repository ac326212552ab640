mod authoring;
pub mod customer_feedback;
pub mod event_registration;

// Re-export customer_feedback fixtures
pub use customer_feedback::{
    customer_feedback, customer_feedback_analytics, customer_feedback_responses,
};

// Re-export event_registration fixtures
pub use event_registration::event_registration;
