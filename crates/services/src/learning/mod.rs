mod controller;
mod feedback;

pub use controller::LearningController;
pub use feedback::{FeedbackSink, StoredFeedbackSink};
