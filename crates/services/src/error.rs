//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{Category, QuestionError, QuestionId, StudentError};
use quiz_core::{Stage, StageError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the REST collaborator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while selecting a working subset.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("requested question count must be at least 1")]
    InvalidCount,
    #[error("category has no questions")]
    NoQuestions,
}

/// Errors emitted by the quiz session and its orchestration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("category {category} has no questions")]
    NoQuestions { category: Category },
    #[error("question {id} was already answered")]
    AlreadyAnswered { id: QuestionId },
    #[error("cannot {action} while in {stage}")]
    WrongStage { stage: Stage, action: &'static str },
    #[error("question index {index} is out of range (subset has {len})")]
    OutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LoginService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoginError {
    #[error("this phone number is not allowed to sign in")]
    NotEligible,
    #[error(transparent)]
    Phone(#[from] StudentError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ReportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error("report message cannot be empty")]
    EmptyMessage,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `AdminService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdminError {
    #[error("admin is not logged in")]
    NotLoggedIn,
    #[error("username and password are required")]
    MissingCredentials,
    #[error("{0} cannot be empty")]
    MissingField(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RequestGate`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GateError {
    #[error("a request is already in flight")]
    Busy,
    #[error("the owner of this gate is gone")]
    TornDown,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
