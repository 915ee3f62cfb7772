#![forbid(unsafe_code)]

pub mod admin_service;
pub mod api;
pub mod app_services;
pub mod error;
pub mod gate;
pub mod login_service;
pub mod print_service;
pub mod report_service;
pub mod sessions;

pub use admin_service::AdminService;
pub use api::{AdminApi, ApiConfig, HttpQuizApi, QuizApi};
pub use app_services::AppServices;
pub use error::{
    AdminError, ApiError, AppServicesError, GateError, LoginError, PlanError, QuizError,
    ReportError,
};
pub use gate::{InFlight, RequestGate};
pub use login_service::LoginService;
pub use print_service::PrintSheetService;
pub use report_service::ReportService;

pub use sessions::{
    AnswerOutcome, AnswerReview, AnswerReviewService, FinishOutcome, NextOutcome, PlanMode,
    QuizLoopService, QuizProgress, QuizSession, ReviewItem,
};
