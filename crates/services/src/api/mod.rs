//! The REST collaborator: trait seams plus the reqwest implementation.

mod config;
mod dto;
mod http;

use async_trait::async_trait;

use quiz_core::model::{
    CatalogQuestion, Category, CategorySummary, NewQuestionReport, PrintDistribution, NewVipStudent, Question, QuestionReport,
    ReportId, Student, StudentId, StudentProgress, VipStudent, VipStudentId,
};

use crate::error::ApiError;

pub use config::{
    API_BASE_URL_ENV, ApiConfig, DEFAULT_API_BASE_URL, DEFAULT_MEDIA_BASE_URL, MEDIA_BASE_URL_ENV,
};
pub use dto::{ProgressUpdate, ResultMail, ResultSubmission};
pub use http::HttpQuizApi;

/// Student-facing endpoints.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `GET /question-categories`.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// `GET /categories-summary/{student}`.
    async fn categories_summary(
        &self,
        student: StudentId,
    ) -> Result<Vec<CategorySummary>, ApiError>;

    /// `POST /questions/by-category`.
    async fn questions_by_category(&self, category: &Category) -> Result<Vec<Question>, ApiError>;

    /// `GET /student-progress/{student}/{category}`; `None` when no record exists yet.
    async fn progress(
        &self,
        student: StudentId,
        category: &Category,
    ) -> Result<Option<StudentProgress>, ApiError>;

    /// `POST /student-progress` (upsert).
    async fn save_progress(&self, update: &ProgressUpdate) -> Result<(), ApiError>;

    /// `POST /report-question`.
    async fn report_question(&self, report: &NewQuestionReport) -> Result<(), ApiError>;

    /// `POST /students`.
    async fn submit_result(&self, result: &ResultSubmission) -> Result<(), ApiError>;

    /// `POST /email/sendMail`.
    async fn send_result_mail(&self, mail: &ResultMail) -> Result<(), ApiError>;

    /// `POST /vip-students/check`; `None` when the phone is not eligible.
    async fn check_phone(&self, phone: &str) -> Result<Option<Student>, ApiError>;

    /// `GET /questions`: every bank's questions, each tagged with its category.
    async fn all_questions(&self) -> Result<Vec<CatalogQuestion>, ApiError>;

    /// `GET /pdf-distribution`: per-bank counts for the printable sheet.
    async fn print_distribution(&self) -> Result<PrintDistribution, ApiError>;
}

/// Admin endpoints.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `POST /admin-login`; any non-success status is a rejection.
    async fn admin_login(&self, username: &str, password: &str) -> Result<(), ApiError>;

    async fn vip_students(&self) -> Result<Vec<VipStudent>, ApiError>;

    async fn add_vip_student(&self, student: &NewVipStudent) -> Result<(), ApiError>;

    async fn delete_vip_student(&self, id: VipStudentId) -> Result<(), ApiError>;

    /// Multipart upload of a spreadsheet under the `file` field. Returns the
    /// server's message, if any.
    async fn bulk_upload_vip_students(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, ApiError>;

    async fn reports(&self) -> Result<Vec<QuestionReport>, ApiError>;

    async fn delete_report(&self, id: ReportId) -> Result<(), ApiError>;
}
