use crate::model::{Question, UserAnswers};

/// Final tally of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    correct: u32,
    total: u32,
}

impl QuizScore {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    /// Count correct answers over the subset. Unanswered questions count as wrong.
    #[must_use]
    pub fn from_answers(subset: &[Question], answers: &UserAnswers) -> Self {
        let correct = subset
            .iter()
            .filter(|q| answers.get(q.id).is_some_and(|ix| q.is_correct_choice(ix)))
            .count();
        Self::new(
            u32::try_from(correct).unwrap_or(u32::MAX),
            u32::try_from(subset.len()).unwrap_or(u32::MAX),
        )
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.total - self.correct
    }

    /// Percentage rounded to one decimal place; 0.0 for an empty quiz.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let raw = f64::from(self.correct) / f64::from(self.total) * 100.0;
        (raw * 10.0).round() / 10.0
    }

    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage())
    }
}
