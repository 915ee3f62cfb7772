use crate::model::{FinalizedQuestions, Question, QuestionId, UserAnswers};

/// Correct / incorrect projections of the current subset.
///
/// Both lists follow subset order and are recomputed from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: Vec<QuestionId>,
    pub incorrect: Vec<QuestionId>,
}

impl Tally {
    #[must_use]
    pub fn compute(
        subset: &[Question],
        answers: &UserAnswers,
        finalized: &FinalizedQuestions,
    ) -> Self {
        let mut tally = Self::default();
        for question in subset {
            let matched = answers
                .get(question.id)
                .is_some_and(|ix| question.is_correct_choice(ix));
            if matched {
                tally.correct.push(question.id);
            } else if finalized.contains(question.id) {
                tally.incorrect.push(question.id);
            }
        }
        tally
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct.len()
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.incorrect.len()
    }
}

/// Which answered questions the per-category review page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewFilter {
    Correct,
    Wrong,
}

impl ReviewFilter {
    /// Parse the route segment (`correct` or `wrong`).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "correct" => Some(Self::Correct),
            "wrong" => Some(Self::Wrong),
            _ => None,
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Wrong => "wrong",
        }
    }

    /// Only answered questions are considered; unanswered ones match neither filter.
    #[must_use]
    pub fn matches(self, question: &Question, answers: &UserAnswers) -> bool {
        let Some(selected) = answers.get(question.id) else {
            return false;
        };
        let correct = question.is_correct_choice(selected);
        match self {
            Self::Correct => correct,
            Self::Wrong => !correct,
        }
    }

    #[must_use]
    pub fn apply<'a>(self, questions: &'a [Question], answers: &UserAnswers) -> Vec<&'a Question> {
        questions
            .iter()
            .filter(|q| self.matches(q, answers))
            .collect()
    }
}
