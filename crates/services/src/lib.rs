#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth_service;
pub mod config;
pub mod error;
pub mod home_service;
pub mod learning;
pub mod session_context;

pub use study_core::Clock;

pub use api::{AuthGateway, ContentApi, HttpBackend};
pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use config::ApiConfig;
pub use error::{ApiError, AppServicesError, AuthError, ConfigError, LearningError};
pub use home_service::{HomeService, RECOMMENDATION_LIMIT};
pub use learning::{FeedbackSink, LearningController, StoredFeedbackSink};
pub use session_context::SessionContext;
