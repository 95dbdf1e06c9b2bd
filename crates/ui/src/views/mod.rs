mod home;
mod learning;
mod login;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use learning::LearningView;
pub use login::LoginView;
pub use state::{ViewError, ViewState, view_state_from_resource};
