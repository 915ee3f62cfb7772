use std::sync::Arc;

use quiz_core::ReviewFilter;
use quiz_core::model::{Category, Question, QuestionBank, StudentId};

use crate::api::QuizApi;
use crate::error::QuizError;

/// One answered question on the per-category review page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub question: Question,
    pub selected: usize,
    pub correct_index: usize,
}

impl ReviewItem {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected == self.correct_index
    }
}

/// The student's correct or wrong answers across a whole category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReview {
    pub category: Category,
    pub filter: ReviewFilter,
    /// Questions in the category, answered or not.
    pub total: usize,
    pub items: Vec<ReviewItem>,
}

/// Read-only loader for `/review/{category}/{correct|wrong}`.
#[derive(Clone)]
pub struct AnswerReviewService {
    api: Arc<dyn QuizApi>,
}

impl AnswerReviewService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self { api }
    }

    /// Load the bank and the stored answers, keeping questions that match `filter`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` if either request fails. A missing progress
    /// record yields an empty review.
    pub async fn load(
        &self,
        student: StudentId,
        category: Category,
        filter: ReviewFilter,
    ) -> Result<AnswerReview, QuizError> {
        let questions = self.api.questions_by_category(&category).await?;
        let progress = self
            .api
            .progress(student, &category)
            .await?
            .unwrap_or_default();
        let bank = QuestionBank::from_questions(category.clone(), questions);

        let items = filter
            .apply(bank.questions(), &progress.user_answers)
            .into_iter()
            .filter_map(|question| {
                let selected = progress.user_answers.get(question.id)?;
                let correct_index = question.correct_index().ok()?;
                Some(ReviewItem {
                    question: question.clone(),
                    selected,
                    correct_index,
                })
            })
            .collect();

        Ok(AnswerReview {
            category,
            filter,
            total: bank.len(),
            items,
        })
    }
}
