use std::sync::Arc;

use quiz_core::model::{NewQuestionReport, QuestionId, Student};

use crate::api::QuizApi;
use crate::error::ReportError;

/// Sends free-text problem reports about a question.
#[derive(Clone)]
pub struct ReportService {
    api: Arc<dyn QuizApi>,
}

impl ReportService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self { api }
    }

    /// `question_number` is the 1-based position shown to the student.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::EmptyMessage` for blank input and
    /// `ReportError::Api` if the request fails.
    pub async fn report(
        &self,
        student: &Student,
        question_id: QuestionId,
        question_number: u32,
        message: &str,
    ) -> Result<(), ReportError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ReportError::EmptyMessage);
        }
        let report = NewQuestionReport {
            student_id: student.id,
            student_name: student.name.clone(),
            student_phone: student.phone.clone(),
            question_id,
            question_number,
            message: message.to_string(),
        };
        self.api.report_question(&report).await?;
        Ok(())
    }
}
