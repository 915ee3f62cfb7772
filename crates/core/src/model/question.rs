use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::model::{Category, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Data-integrity violations in backend-supplied questions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has no answers")]
    NoAnswers { id: QuestionId },

    #[error("question {id} has no answer flagged as correct")]
    NoCorrectAnswer { id: QuestionId },

    #[error("question {id} has {count} answers flagged as correct")]
    MultipleCorrectAnswers { id: QuestionId, count: usize },

    #[error("answer index {index} is out of range for question {id}")]
    AnswerOutOfRange { id: QuestionId, index: usize },
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// One choice of a multiple-choice question. `text` is untrusted HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_correct: bool,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

// The backend sends `is_correct` as 0/1, sometimes quoted.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value == 1,
        Flag::Text(value) => matches!(value.trim(), "1" | "true"),
        Flag::Null(()) => false,
    })
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A backend-owned question. `content` and `solution` are untrusted HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub solution: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, content: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id,
            content: content.into(),
            answers,
            solution: None,
        }
    }

    #[must_use]
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    /// Index of the single answer flagged as correct.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` unless exactly one answer is flagged.
    pub fn correct_index(&self) -> Result<usize, QuestionError> {
        if self.answers.is_empty() {
            return Err(QuestionError::NoAnswers { id: self.id });
        }

        let mut flagged = self
            .answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_correct)
            .map(|(index, _)| index);

        let first = flagged
            .next()
            .ok_or(QuestionError::NoCorrectAnswer { id: self.id })?;
        let extra = flagged.count();
        if extra > 0 {
            return Err(QuestionError::MultipleCorrectAnswers {
                id: self.id,
                count: extra + 1,
            });
        }
        Ok(first)
    }

    /// Returns true when `index` selects the correct answer.
    ///
    /// A question that fails validation never matches.
    #[must_use]
    pub fn is_correct_choice(&self, index: usize) -> bool {
        self.correct_index().is_ok_and(|correct| correct == index)
    }

    /// Checks that `index` addresses one of this question's answers.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::AnswerOutOfRange` otherwise.
    pub fn check_choice(&self, index: usize) -> Result<(), QuestionError> {
        if index < self.answers.len() {
            Ok(())
        } else {
            Err(QuestionError::AnswerOutOfRange { id: self.id, index })
        }
    }

    #[must_use]
    pub fn has_solution(&self) -> bool {
        self.solution
            .as_deref()
            .is_some_and(|solution| !solution.trim().is_empty())
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// A question excluded from a bank because it failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedQuestion {
    pub id: QuestionId,
    pub error: QuestionError,
}

/// The validated question set of one category, in backend order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    category: Category,
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
    rejected: Vec<RejectedQuestion>,
}

impl QuestionBank {
    /// Build a bank, keeping only questions with exactly one correct answer.
    ///
    /// Duplicate ids keep their first occurrence.
    #[must_use]
    pub fn from_questions(category: Category, questions: Vec<Question>) -> Self {
        let mut kept = Vec::with_capacity(questions.len());
        let mut index = HashMap::with_capacity(questions.len());
        let mut rejected = Vec::new();

        for question in questions {
            if index.contains_key(&question.id) {
                continue;
            }
            match question.correct_index() {
                Ok(_) => {
                    index.insert(question.id, kept.len());
                    kept.push(question);
                }
                Err(error) => rejected.push(RejectedQuestion {
                    id: question.id,
                    error,
                }),
            }
        }

        Self {
            category,
            questions: kept,
            index,
            rejected,
        }
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn rejected(&self) -> &[RejectedQuestion] {
        &self.rejected
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.index.get(&id).map(|&ix| &self.questions[ix])
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Resolve an id list to questions, preserving order and dropping unknown ids.
    #[must_use]
    pub fn resolve(&self, ids: &[QuestionId]) -> Vec<Question> {
        ids.iter().filter_map(|id| self.get(*id)).cloned().collect()
    }
}
