use quiz_core::model::{
    Category, FinalizedQuestions, Question, QuestionId, QuizScore, SessionRecord, StudentId,
    UserAnswers,
};
use quiz_core::{Stage, StageEvent, Tally};

use super::plan::PlanMode;
use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Result of committing an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: QuestionId,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// Result of pressing "next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// The current question was open; it is now locked as skipped.
    Locked { question_id: QuestionId },
    Advanced { index: usize },
    /// Past the last question; the page moved to review.
    ReachedEnd,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz run for one (student, category).
///
/// Steps through the working subset, records write-once answers and keeps the
/// lock set that prevents re-submission.
#[derive(Debug, Clone)]
pub struct QuizSession {
    student: StudentId,
    category: Category,
    questions: Vec<Question>,
    mode: PlanMode,
    current: usize,
    answers: UserAnswers,
    finalized: FinalizedQuestions,
    stage: Stage,
    result_submitted: bool,
}

impl QuizSession {
    /// Create a session parked on the category picker.
    ///
    /// `answers` may cover the whole category; only the subset is tallied.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if the subset is empty.
    pub fn new(
        student: StudentId,
        category: Category,
        questions: Vec<Question>,
        mode: PlanMode,
        start_index: usize,
        answers: UserAnswers,
        finalized: FinalizedQuestions,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions { category });
        }
        let current = start_index.min(questions.len() - 1);
        Ok(Self {
            student,
            category,
            questions,
            mode,
            current,
            answers,
            finalized,
            stage: Stage::ChooseCategory,
            result_submitted: false,
        })
    }

    #[must_use]
    pub fn student(&self) -> StudentId {
        self.student
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }

    #[must_use]
    pub fn finalized(&self) -> &FinalizedQuestions {
        &self.finalized
    }

    /// A question is locked once answered or skipped.
    #[must_use]
    pub fn is_locked(&self, id: QuestionId) -> bool {
        self.answers.contains(id) || self.finalized.contains(id)
    }

    #[must_use]
    pub fn result_submitted(&self) -> bool {
        self.result_submitted
    }

    pub(crate) fn mark_result_submitted(&mut self) {
        self.result_submitted = true;
    }

    /// The persisted shape of this run.
    #[must_use]
    pub fn session_record(&self) -> SessionRecord {
        SessionRecord::new(
            self.questions.iter().map(|q| q.id).collect(),
            self.current_question().map(|q| q.id),
        )
    }

    //
    // ─── DERIVED ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally::compute(&self.questions, &self.answers, &self.finalized)
    }

    #[must_use]
    pub fn score(&self) -> QuizScore {
        QuizScore::from_answers(&self.questions, &self.answers)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let tally = self.tally();
        let answered = self
            .questions
            .iter()
            .filter(|q| self.answers.contains(q.id))
            .count();
        let finalized = self
            .questions
            .iter()
            .filter(|q| self.is_locked(q.id))
            .count();
        QuizProgress {
            total: self.questions.len(),
            position: self.current + 1,
            answered,
            finalized,
            correct: tally.correct_count(),
            incorrect: tally.incorrect_count(),
        }
    }

    /// Subset index of a question, for the jump panels.
    #[must_use]
    pub fn index_of(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    //
    // ─── STAGES ────────────────────────────────────────────────────────────────
    //

    pub(crate) fn apply(&mut self, event: StageEvent) -> Result<Stage, QuizError> {
        Ok(self.stage.apply(event)?)
    }

    fn require(&self, stage: Stage, action: &'static str) -> Result<(), QuizError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(QuizError::WrongStage {
                stage: self.stage,
                action,
            })
        }
    }

    fn check_index(&self, index: usize) -> Result<(), QuizError> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(QuizError::OutOfRange {
                index,
                len: self.questions.len(),
            })
        }
    }

    /// Intro to quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stage` outside the intro.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.apply(StageEvent::Start)?;
        Ok(())
    }

    /// Leave the quiz early, back to the category picker.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stage` outside the quiz.
    pub fn end_training(&mut self) -> Result<(), QuizError> {
        self.apply(StageEvent::EndTraining)?;
        Ok(())
    }

    /// Review to result.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stage` outside the review grid.
    pub fn show_result(&mut self) -> Result<QuizScore, QuizError> {
        self.apply(StageEvent::ShowResult)?;
        Ok(self.score())
    }

    /// # Errors
    ///
    /// Returns `QuizError::Stage` outside the review grid.
    pub fn show_all(&mut self) -> Result<(), QuizError> {
        self.apply(StageEvent::ShowAll)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::OutOfRange` for an index outside the subset and
    /// `QuizError::Stage` outside the review grid.
    pub fn open_review_question(&mut self, index: usize) -> Result<&Question, QuizError> {
        self.check_index(index)?;
        self.apply(StageEvent::OpenQuestion(index))?;
        Ok(&self.questions[index])
    }

    /// # Errors
    ///
    /// Returns `QuizError::Stage` unless a review leaf is open.
    pub fn back_to_review(&mut self) -> Result<(), QuizError> {
        self.apply(StageEvent::BackToReview)?;
        Ok(())
    }

    /// Return from the review grid to the quiz at `position` (the last saved
    /// question), or at the current index when that id is not in the subset.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stage` outside the review grid.
    pub fn resume_quiz(&mut self, position: Option<QuestionId>) -> Result<usize, QuizError> {
        self.apply(StageEvent::ResumeQuiz)?;
        self.current = self.resume_index(position);
        Ok(self.current)
    }

    /// Where "back to my place" lands: the saved question if it is still in
    /// the subset, else the current index.
    #[must_use]
    pub fn resume_index(&self, position: Option<QuestionId>) -> usize {
        position
            .and_then(|id| self.index_of(id))
            .unwrap_or(self.current)
    }

    /// # Errors
    ///
    /// Returns `QuizError::Stage` outside the result page.
    pub fn back_to_categories(&mut self) -> Result<(), QuizError> {
        self.apply(StageEvent::BackToCategories)?;
        Ok(())
    }

    //
    // ─── ANSWERING ─────────────────────────────────────────────────────────────
    //

    /// Commit an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyAnswered` if the question is locked,
    /// `QuizError::Question` for an out-of-range choice and
    /// `QuizError::WrongStage` outside the quiz. Nothing changes on error.
    pub fn answer(&mut self, selected: usize) -> Result<AnswerOutcome, QuizError> {
        self.require(Stage::Quiz, "answer")?;
        let question = &self.questions[self.current];
        let id = question.id;
        if self.is_locked(id) {
            return Err(QuizError::AlreadyAnswered { id });
        }
        question.check_choice(selected)?;
        let correct_index = question.correct_index()?;

        self.answers
            .record(id, selected)
            .map_err(|_| QuizError::AlreadyAnswered { id })?;
        self.finalized.insert(id);

        Ok(AnswerOutcome {
            question_id: id,
            selected,
            correct_index,
            is_correct: selected == correct_index,
        })
    }

    /// Advance, or lock an open question as skipped first.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongStage` outside the quiz.
    pub fn next(&mut self) -> Result<NextOutcome, QuizError> {
        self.require(Stage::Quiz, "advance")?;
        let id = self.questions[self.current].id;
        if !self.is_locked(id) {
            self.finalized.insert(id);
            return Ok(NextOutcome::Locked { question_id: id });
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            return Ok(NextOutcome::Advanced {
                index: self.current,
            });
        }
        self.apply(StageEvent::ReachedEnd)?;
        Ok(NextOutcome::ReachedEnd)
    }

    /// Step back one question. Locks are kept.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongStage` outside the quiz.
    pub fn previous(&mut self) -> Result<Option<usize>, QuizError> {
        self.require(Stage::Quiz, "go back")?;
        if self.current == 0 {
            return Ok(None);
        }
        self.current -= 1;
        Ok(Some(self.current))
    }

    /// Jump to a subset index from the correct/incorrect panels.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OutOfRange` or `QuizError::WrongStage`.
    pub fn jump_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.require(Stage::Quiz, "jump")?;
        self.check_index(index)?;
        self.current = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Answer;
    use quiz_core::StageError;

    fn question(id: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("q{id}"),
            vec![Answer::new("right", true), Answer::new("wrong", false)],
        )
    }

    fn session(n: u64) -> QuizSession {
        let mut session = QuizSession::new(
            StudentId::new(1),
            Category::new("A").unwrap(),
            (1..=n).map(question).collect(),
            PlanMode::Unanswered,
            0,
            UserAnswers::new(),
            FinalizedQuestions::new(),
        )
        .unwrap();
        session.apply(StageEvent::CategoryLoaded).unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn empty_subset_is_rejected() {
        let err = QuizSession::new(
            StudentId::new(1),
            Category::new("A").unwrap(),
            Vec::new(),
            PlanMode::Unanswered,
            0,
            UserAnswers::new(),
            FinalizedQuestions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::NoQuestions { .. }));
    }

    #[test]
    fn answers_are_write_once() {
        let mut session = session(2);
        let outcome = session.answer(1).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.correct_index, 0);

        let err = session.answer(0).unwrap_err();
        assert!(matches!(err, QuizError::AlreadyAnswered { .. }));
        assert_eq!(session.answers().get(QuestionId::new(1)), Some(1));
    }

    #[test]
    fn out_of_range_choice_changes_nothing() {
        let mut session = session(1);
        assert!(matches!(session.answer(5), Err(QuizError::Question(_))));
        assert!(session.answers().is_empty());
        assert!(session.finalized().is_empty());
    }

    #[test]
    fn next_locks_open_question_before_advancing() {
        let mut session = session(2);
        assert_eq!(
            session.next().unwrap(),
            NextOutcome::Locked {
                question_id: QuestionId::new(1)
            }
        );
        assert_eq!(session.current_index(), 0);
        assert!(matches!(
            session.answer(0),
            Err(QuizError::AlreadyAnswered { .. })
        ));

        assert_eq!(session.next().unwrap(), NextOutcome::Advanced { index: 1 });
        session.answer(0).unwrap();
        assert_eq!(session.next().unwrap(), NextOutcome::ReachedEnd);
        assert_eq!(session.stage(), Stage::Review);

        let tally = session.tally();
        assert_eq!(tally.correct, vec![QuestionId::new(2)]);
        assert_eq!(tally.incorrect, vec![QuestionId::new(1)]);
    }

    #[test]
    fn previous_keeps_locks() {
        let mut session = session(3);
        session.answer(0).unwrap();
        session.next().unwrap();
        assert_eq!(session.previous().unwrap(), Some(0));
        assert_eq!(session.previous().unwrap(), None);
        assert!(session.is_locked(QuestionId::new(1)));
    }

    #[test]
    fn review_resume_and_result() {
        let mut session = session(2);
        session.answer(0).unwrap();
        session.next().unwrap();
        session.answer(0).unwrap();
        session.next().unwrap();

        assert_eq!(session.resume_quiz(Some(QuestionId::new(1))).unwrap(), 0);
        assert_eq!(session.stage(), Stage::Quiz);
        session.jump_to(1).unwrap();
        session.next().unwrap();

        let picked = session.open_review_question(1).unwrap().id;
        assert_eq!(picked, QuestionId::new(2));
        session.back_to_review().unwrap();

        let score = session.show_result().unwrap();
        assert_eq!(score.percentage_label(), "100.0");
        session.back_to_categories().unwrap();
        assert_eq!(session.stage(), Stage::ChooseCategory);
    }

    #[test]
    fn resume_index_ignores_ids_outside_the_subset() {
        let mut session = session(3);
        session.jump_to(2).unwrap();
        assert_eq!(session.resume_index(Some(QuestionId::new(2))), 1);
        assert_eq!(session.resume_index(Some(QuestionId::new(99))), 2);
        assert_eq!(session.resume_index(None), 2);
    }

    #[test]
    fn actions_outside_quiz_are_rejected() {
        let mut session = session(1);
        session.end_training().unwrap();
        assert!(matches!(
            session.answer(0),
            Err(QuizError::WrongStage { action: "answer", .. })
        ));
        assert!(matches!(
            session.show_result(),
            Err(QuizError::Stage(StageError::InvalidTransition { .. }))
        ));
    }

    #[test]
    fn progress_counts_subset_only() {
        let mut session = session(3);
        session.answer(0).unwrap();
        session.next().unwrap();
        session.next().unwrap();

        let progress = session.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.position, 2);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.finalized, 2);
        assert_eq!(progress.correct, 1);
        assert_eq!(progress.incorrect, 1);
        assert_eq!(progress.remaining(), 1);
    }
}
