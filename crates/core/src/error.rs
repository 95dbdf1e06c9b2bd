use thiserror::Error;

use crate::model::{FeedbackError, IdError, ModeError};
use crate::session::{BatchError, SessionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Batch(#[from] BatchError),
}
