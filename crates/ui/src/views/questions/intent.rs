use quiz_core::model::{Category, Student};
use services::{FinishOutcome, QuizError, QuizLoopService, QuizSession};
use tracing::debug;

/// Everything the questions page can ask the quiz loop to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Enter { category: Category, requested: usize },
    Reset { category: Category, requested: usize },
    Start,
    Answer(usize),
    Next,
    Previous,
    JumpTo(usize),
    BackToMyPlace,
    EndTraining,
    ShowAll,
    OpenQuestion(usize),
    BackToReview,
    ResumeQuiz,
    Finish,
    Restart,
    BackToCategories,
}

/// What the page must do besides re-rendering the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentEffect {
    None,
    Entered,
    Finished(FinishOutcome),
    /// Back on the category picker; counts may have changed.
    LeftQuiz,
}

/// Apply `intent` to the session held in `slot`.
///
/// Session operations leave the session untouched on error, so the caller can
/// always write `slot` back.
///
/// # Errors
///
/// Propagates `QuizError` from the quiz loop.
pub async fn run_intent(
    quiz: &QuizLoopService,
    student: &Student,
    slot: &mut Option<QuizSession>,
    intent: QuizIntent,
) -> Result<IntentEffect, QuizError> {
    match intent {
        QuizIntent::Enter {
            category,
            requested,
        } => {
            *slot = Some(quiz.enter_category(student, category, requested).await?);
            return Ok(IntentEffect::Entered);
        }
        QuizIntent::Reset {
            category,
            requested,
        } => {
            *slot = Some(quiz.reset_category(student, category, requested).await?);
            return Ok(IntentEffect::Entered);
        }
        _ => {}
    }

    let Some(session) = slot.as_mut() else {
        debug!(?intent, "no open session; ignoring");
        return Ok(IntentEffect::None);
    };

    match intent {
        QuizIntent::Start => session.start()?,
        QuizIntent::Answer(index) => {
            quiz.answer_current(session, index).await?;
        }
        QuizIntent::Next => {
            quiz.next(session).await?;
        }
        QuizIntent::Previous => {
            quiz.previous(session).await?;
        }
        QuizIntent::JumpTo(index) => quiz.jump_to(session, index)?,
        QuizIntent::BackToMyPlace => {
            quiz.back_to_my_place(session).await?;
        }
        QuizIntent::EndTraining => {
            session.end_training()?;
            return Ok(IntentEffect::LeftQuiz);
        }
        QuizIntent::ShowAll => session.show_all()?,
        QuizIntent::OpenQuestion(index) => {
            session.open_review_question(index)?;
        }
        QuizIntent::BackToReview => session.back_to_review()?,
        QuizIntent::ResumeQuiz => {
            quiz.resume_quiz(session).await?;
        }
        QuizIntent::Finish => {
            let outcome = quiz.finish(student, session).await?;
            return Ok(IntentEffect::Finished(outcome));
        }
        QuizIntent::Restart => {
            let category = session.category().clone();
            let requested = session.len();
            *slot = Some(quiz.reset_category(student, category, requested).await?);
            return Ok(IntentEffect::Entered);
        }
        QuizIntent::BackToCategories => {
            session.back_to_categories()?;
            return Ok(IntentEffect::LeftQuiz);
        }
        QuizIntent::Enter { .. } | QuizIntent::Reset { .. } => {}
    }
    Ok(IntentEffect::None)
}
