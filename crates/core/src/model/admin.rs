use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, ReportId, StudentId, VipStudentId};

/// Gender recorded when the admin leaves the field blank ("unspecified").
pub const DEFAULT_GENDER: &str = "غير محدد";

/// A phone number allowed through the login gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipStudent {
    pub id: VipStudentId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVipStudent {
    pub name: String,
    pub phone: String,
    pub gender: String,
}

impl NewVipStudent {
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>, gender: Option<String>) -> Self {
        let gender = gender
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GENDER.to_string());
        Self {
            name: name.into(),
            phone: phone.into(),
            gender,
        }
    }
}

/// A student's free-text error report about a question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionReport {
    pub id: ReportId,
    pub student_id: StudentId,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_phone: String,
    #[serde(default)]
    pub question_id: Option<QuestionId>,
    #[serde(default)]
    pub question_number: Option<u32>,
    #[serde(default)]
    pub question_category: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestionReport {
    pub student_id: StudentId,
    pub student_name: String,
    pub student_phone: String,
    pub question_id: QuestionId,
    pub question_number: u32,
    pub message: String,
}
