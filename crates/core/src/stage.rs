//! Stage machine of the quiz page.
//!
//! Every stage change goes through [`Stage::transition`]; an event that is not
//! allowed from the current stage is rejected and the stage stays put.

use std::fmt;
use thiserror::Error;

/// The closed set of quiz page stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    ChooseCategory,
    Intro,
    Quiz,
    Review,
    ReviewAll,
    ReviewQuestion { index: usize },
    Result,
}

/// Triggers that move the page between stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageEvent {
    /// A category was picked and its subset is ready.
    CategoryLoaded,
    /// Progress for a category was wiped and a fresh subset is ready.
    ResetCompleted,
    Start,
    /// "Next" was pressed on the last question.
    ReachedEnd,
    /// The student left the quiz early.
    EndTraining,
    ShowResult,
    ShowAll,
    OpenQuestion(usize),
    BackToReview,
    /// Return to the quiz at the last saved position.
    ResumeQuiz,
    BackToCategories,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StageError {
    #[error("cannot apply {event:?} while in {from}")]
    InvalidTransition { from: Stage, event: StageEvent },
}

impl Stage {
    /// Apply an event.
    ///
    /// # Errors
    ///
    /// Returns `StageError::InvalidTransition` for events the current stage
    /// does not accept.
    pub fn transition(self, event: StageEvent) -> Result<Self, StageError> {
        use StageEvent as E;

        let next = match (self, event) {
            (Self::ChooseCategory, E::CategoryLoaded)
            | (Self::ChooseCategory | Self::Result, E::ResetCompleted) => Self::Intro,
            (Self::Intro, E::Start) | (Self::Review, E::ResumeQuiz) => Self::Quiz,
            (Self::Quiz, E::ReachedEnd)
            | (Self::ReviewAll | Self::ReviewQuestion { .. }, E::BackToReview) => Self::Review,
            (Self::Quiz, E::EndTraining) | (Self::Result, E::BackToCategories) => {
                Self::ChooseCategory
            }
            (Self::Review, E::ShowResult) => Self::Result,
            (Self::Review, E::ShowAll) => Self::ReviewAll,
            (Self::Review, E::OpenQuestion(index)) => Self::ReviewQuestion { index },
            (from, event) => return Err(StageError::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    /// Apply an event in place, leaving the stage untouched on error.
    ///
    /// # Errors
    ///
    /// See [`Stage::transition`].
    pub fn apply(&mut self, event: StageEvent) -> Result<Self, StageError> {
        *self = self.transition(event)?;
        Ok(*self)
    }

    #[must_use]
    pub fn is_reviewing(self) -> bool {
        matches!(
            self,
            Self::Review | Self::ReviewAll | Self::ReviewQuestion { .. }
        )
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ChooseCategory => "chooseCategory",
            Self::Intro => "intro",
            Self::Quiz => "quiz",
            Self::Review => "review",
            Self::ReviewAll => "reviewAll",
            Self::ReviewQuestion { .. } => "reviewQuestion",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StageEvent as E;

    #[test]
    fn happy_path_reaches_result_and_returns() {
        let mut stage = Stage::default();
        for (event, expected) in [
            (E::CategoryLoaded, Stage::Intro),
            (E::Start, Stage::Quiz),
            (E::ReachedEnd, Stage::Review),
            (E::ShowResult, Stage::Result),
            (E::BackToCategories, Stage::ChooseCategory),
        ] {
            assert_eq!(stage.apply(event), Ok(expected));
        }
    }

    #[test]
    fn review_leaves_only_return_to_review() {
        let stage = Stage::Review.transition(E::OpenQuestion(4)).unwrap();
        assert_eq!(stage, Stage::ReviewQuestion { index: 4 });
        assert!(stage.transition(E::ShowResult).is_err());
        assert_eq!(stage.transition(E::BackToReview), Ok(Stage::Review));

        let all = Stage::Review.transition(E::ShowAll).unwrap();
        assert!(all.transition(E::ResumeQuiz).is_err());
        assert_eq!(all.transition(E::BackToReview), Ok(Stage::Review));
    }

    #[test]
    fn review_can_resume_quiz() {
        assert_eq!(Stage::Review.transition(E::ResumeQuiz), Ok(Stage::Quiz));
    }

    #[test]
    fn reset_is_allowed_from_category_picker_and_result() {
        assert_eq!(Stage::ChooseCategory.transition(E::ResetCompleted), Ok(Stage::Intro));
        assert_eq!(Stage::Result.transition(E::ResetCompleted), Ok(Stage::Intro));
        assert!(Stage::Quiz.transition(E::ResetCompleted).is_err());
    }

    #[test]
    fn invalid_event_keeps_stage() {
        let mut stage = Stage::Intro;
        let err = stage.apply(E::ShowResult).unwrap_err();
        assert_eq!(
            err,
            StageError::InvalidTransition {
                from: Stage::Intro,
                event: E::ShowResult
            }
        );
        assert_eq!(stage, Stage::Intro);
        assert_eq!(err.to_string(), "cannot apply ShowResult while in intro");
    }

    #[test]
    fn quiz_can_end_training_early() {
        assert_eq!(Stage::Quiz.transition(E::EndTraining), Ok(Stage::ChooseCategory));
        assert!(Stage::Intro.transition(E::EndTraining).is_err());
    }
}
