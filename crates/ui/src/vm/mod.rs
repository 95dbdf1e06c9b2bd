mod home_vm;
mod learning_vm;
mod login_vm;

pub use home_vm::{HomeVm, RecommendationVm, map_recommendations, recommendation_link};
pub use learning_vm::{
    LearningCardVm, LearningQuery, LearningScreen, RecommendedCardVm, feedback_class,
    map_learning_state,
};
pub use login_vm::{form_credentials, login_failure_message};
