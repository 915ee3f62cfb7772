//! Wire payloads exchanged with the backend.

use serde::{Deserialize, Serialize};

use quiz_core::model::{
    CatalogQuestion, Category, Question, QuizScore, Student, StudentId, UserAnswers,
};

/// Body of `POST /student-progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    pub student_id: StudentId,
    pub category: Category,
    pub current_index: usize,
    pub user_answers: UserAnswers,
}

impl ProgressUpdate {
    /// The payload that wipes a student's progress for a category.
    #[must_use]
    pub fn cleared(student_id: StudentId, category: Category) -> Self {
        Self {
            student_id,
            category,
            current_index: 0,
            user_answers: UserAnswers::new(),
        }
    }
}

/// Body of `POST /students`: the final result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSubmission {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub score: u32,
    pub percentage: String,
}

impl ResultSubmission {
    #[must_use]
    pub fn new(student: &Student, score: &QuizScore) -> Self {
        Self {
            name: student.name.clone(),
            phone: student.phone.clone(),
            email: student.email_or_empty().to_string(),
            score: score.correct(),
            percentage: score.percentage_label(),
        }
    }
}

/// Body of `POST /email/sendMail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultMail {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub correct: u32,
    pub wrong: u32,
    pub percentage: String,
}

impl ResultMail {
    #[must_use]
    pub fn new(student: &Student, score: &QuizScore) -> Self {
        Self {
            email: student.email_or_empty().to_string(),
            name: student.name.clone(),
            phone: student.phone.clone(),
            correct: score.correct(),
            wrong: score.wrong(),
            percentage: score.percentage_label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryRequest<'a> {
    pub category: &'a Category,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsEnvelope {
    #[serde(default)]
    pub data: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogEnvelope {
    #[serde(default)]
    pub data: Vec<CatalogQuestion>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PhoneCheckRequest<'a> {
    pub phone: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhoneCheckResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub student: Option<Student>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminLoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn student() -> Student {
        Student {
            id: StudentId::new(3),
            name: "Sara".into(),
            phone: "0555".into(),
            email: None,
        }
    }

    #[test]
    fn result_payloads_carry_formatted_percentage() {
        let score = QuizScore::new(7, 10);
        let submission = serde_json::to_value(ResultSubmission::new(&student(), &score)).unwrap();
        assert_eq!(
            submission,
            serde_json::json!({
                "name": "Sara", "phone": "0555", "email": "",
                "score": 7, "percentage": "70.0"
            })
        );

        let mail = ResultMail::new(&student(), &score);
        assert_eq!(mail.wrong, 3);
    }

    #[test]
    fn cleared_progress_has_empty_answers() {
        let update = ProgressUpdate::cleared(StudentId::new(3), Category::new("math").unwrap());
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "student_id": 3, "category": "math",
                "current_index": 0, "user_answers": {}
            })
        );
    }

    #[test]
    fn phone_check_tolerates_missing_student() {
        let parsed: PhoneCheckResponse = serde_json::from_str(r#"{"status": false}"#).unwrap();
        assert!(!parsed.status);
        assert!(parsed.student.is_none());
    }
}
