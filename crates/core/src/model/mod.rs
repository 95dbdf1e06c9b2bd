mod auth;
mod card;
mod feedback;
mod ids;
mod mode;
mod recommendation;

pub use auth::{ACCESS_TOKEN_KEY, AccessToken, AuthTokens, Credentials, REFRESH_TOKEN_KEY};
pub use card::Card;
pub use feedback::{FeedbackError, FeedbackEvent, FeedbackLabel};
pub use ids::{CardId, DeckId, IdError, RankName};
pub use mode::{ModeError, StudyMode};
pub use recommendation::DeckRecommendation;
