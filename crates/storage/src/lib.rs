#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    ClientStorage, FeedbackLogEntry, FeedbackLogRepository, InMemoryRepository, Storage,
    StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
