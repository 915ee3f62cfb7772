use std::sync::{Arc, Mutex, PoisonError};

use quiz_core::{Stage, StageEvent};
use quiz_core::model::{
    Category, CategorySummary, QuestionBank, QuestionId, QuizScore, SessionRecord, Student,
    StudentId, StudentProgress,
};
use storage::LocalStore;
use tracing::{debug, info, warn};

use super::plan::{QuizPlan, QuizPlanBuilder, RandomSampler, Sampler};
use super::service::{AnswerOutcome, NextOutcome, QuizSession};
use crate::api::{ProgressUpdate, QuizApi, ResultMail, ResultSubmission};
use crate::error::QuizError;

/// Result of finishing a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishOutcome {
    pub score: QuizScore,
    /// Whether the result record reached the backend (now or earlier).
    pub submitted: bool,
}

/// Orchestrates the quiz page: backend calls, the local mirror and selection.
#[derive(Clone)]
pub struct QuizLoopService {
    api: Arc<dyn QuizApi>,
    store: LocalStore,
    sampler: Arc<Mutex<Box<dyn Sampler>>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>, store: LocalStore) -> Self {
        Self {
            api,
            store,
            sampler: Arc::new(Mutex::new(Box::new(RandomSampler))),
        }
    }

    /// Replace the sampler, e.g. with a seeded one in tests.
    #[must_use]
    pub fn with_sampler(mut self, sampler: impl Sampler + 'static) -> Self {
        self.sampler = Arc::new(Mutex::new(Box::new(sampler)));
        self
    }

    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    //
    // ─── CATEGORIES ────────────────────────────────────────────────────────────
    //

    /// All categories with the student's counts. A category without a summary
    /// row has not been touched yet; its total comes from the bank itself.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` if the category list or summary request fails.
    pub async fn load_categories(
        &self,
        student: StudentId,
    ) -> Result<Vec<CategorySummary>, QuizError> {
        let categories = self.api.categories().await?;
        let mut summaries = self.api.categories_summary(student).await?;

        let mut merged = Vec::with_capacity(categories.len());
        for category in categories {
            let summary = match summaries.iter().position(|s| s.category == category) {
                Some(ix) => summaries.swap_remove(ix),
                None => self.untouched_summary(category).await,
            };
            merged.push(summary);
        }
        Ok(merged)
    }

    async fn untouched_summary(&self, category: Category) -> CategorySummary {
        let total = match self.api.questions_by_category(&category).await {
            Ok(questions) => {
                let bank = QuestionBank::from_questions(category.clone(), questions);
                u32::try_from(bank.len()).unwrap_or(u32::MAX)
            }
            Err(err) => {
                warn!(category = %category, error = %err, "failed to count bank questions");
                0
            }
        };
        CategorySummary {
            total_questions: total,
            ..CategorySummary::empty(category)
        }
    }

    /// Open a category: fetch questions and progress, pick or restore the
    /// subset, persist it and move to the intro.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty category,
    /// `QuizError::Plan` for a zero count, and API/storage failures.
    pub async fn enter_category(
        &self,
        student: &Student,
        category: Category,
        requested: usize,
    ) -> Result<QuizSession, QuizError> {
        let bank = self.load_bank(&category).await?;
        let progress = self
            .api
            .progress(student.id, &category)
            .await?
            .unwrap_or_default();
        let saved = self.store.load_session(student.id, &category).await?;

        let plan = self.plan(&bank, saved.as_ref(), requested, &progress)?;
        debug!(category = %category, mode = ?plan.mode, size = plan.len(), "quiz subset ready");

        let mut finalized = self.store.load_finalized(student.id, &category).await?;
        finalized.extend(progress.user_answers.answered_ids());

        let record = SessionRecord::new(plan.ids.clone(), plan.start_question());
        self.store
            .save_session(student.id, &category, &record)
            .await?;
        self.store
            .save_finalized(student.id, &category, &finalized)
            .await?;

        let mut session = QuizSession::new(
            student.id,
            category,
            bank.resolve(&plan.ids),
            plan.mode,
            plan.start_index,
            progress.user_answers,
            finalized,
        )?;
        session.apply(StageEvent::CategoryLoaded)?;
        Ok(session)
    }

    /// Wipe local and backend progress for a category and sample a fresh subset.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty category and API/storage
    /// failures. When clearing backend progress fails, nothing is re-sampled.
    pub async fn reset_category(
        &self,
        student: &Student,
        category: Category,
        requested: usize,
    ) -> Result<QuizSession, QuizError> {
        self.store.clear_session(student.id, &category).await?;
        self.store.clear_finalized(student.id, &category).await?;
        self.api
            .save_progress(&ProgressUpdate::cleared(student.id, category.clone()))
            .await?;
        info!(student = %student.id, category = %category, "progress reset");

        let bank = self.load_bank(&category).await?;
        let plan = self.plan(&bank, None, requested, &StudentProgress::default())?;

        let record = SessionRecord::new(plan.ids.clone(), plan.start_question());
        self.store
            .save_session(student.id, &category, &record)
            .await?;

        let mut session = QuizSession::new(
            student.id,
            category,
            bank.resolve(&plan.ids),
            plan.mode,
            plan.start_index,
            Default::default(),
            Default::default(),
        )?;
        session.apply(StageEvent::ResetCompleted)?;
        Ok(session)
    }

    async fn load_bank(&self, category: &Category) -> Result<QuestionBank, QuizError> {
        let questions = self.api.questions_by_category(category).await?;
        let bank = QuestionBank::from_questions(category.clone(), questions);
        for rejected in bank.rejected() {
            warn!(category = %category, error = %rejected.error, "skipping invalid question");
        }
        if bank.is_empty() {
            return Err(QuizError::NoQuestions {
                category: category.clone(),
            });
        }
        Ok(bank)
    }

    fn plan(
        &self,
        bank: &QuestionBank,
        saved: Option<&SessionRecord>,
        requested: usize,
        progress: &StudentProgress,
    ) -> Result<QuizPlan, QuizError> {
        let answered = progress.user_answers.answered_ids();
        let mut sampler = self.sampler.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(QuizPlanBuilder::new(bank)
            .with_saved(saved)
            .build(requested, &answered, &mut **sampler)?)
    }

    //
    // ─── QUIZ ACTIONS ──────────────────────────────────────────────────────────
    //

    /// Commit an answer, lock the question and upsert progress.
    ///
    /// # Errors
    ///
    /// Propagates `QuizSession::answer` errors; persistence failures are logged.
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        selected: usize,
    ) -> Result<AnswerOutcome, QuizError> {
        let outcome = session.answer(selected)?;
        self.mirror_finalized(session).await;
        self.mirror_position(session).await;
        self.push_progress(session).await;
        Ok(outcome)
    }

    /// Press "next": lock, advance or move to review.
    ///
    /// # Errors
    ///
    /// Propagates `QuizSession::next` errors; persistence failures are logged.
    pub async fn next(&self, session: &mut QuizSession) -> Result<NextOutcome, QuizError> {
        let outcome = session.next()?;
        match outcome {
            NextOutcome::Locked { .. } => self.mirror_finalized(session).await,
            NextOutcome::Advanced { .. } => {
                self.mirror_position(session).await;
                self.push_progress(session).await;
            }
            NextOutcome::ReachedEnd => {}
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Propagates `QuizSession::previous` errors.
    pub async fn previous(&self, session: &mut QuizSession) -> Result<Option<usize>, QuizError> {
        let moved = session.previous()?;
        if moved.is_some() {
            self.mirror_position(session).await;
        }
        Ok(moved)
    }

    /// Peek at a question from the correct/incorrect panels. The saved
    /// position is left alone so `back_to_my_place` can return to it.
    ///
    /// # Errors
    ///
    /// Propagates `QuizSession::jump_to` errors.
    pub fn jump_to(&self, session: &mut QuizSession, index: usize) -> Result<(), QuizError> {
        session.jump_to(index)
    }

    /// Return from a panel jump to the last saved position.
    ///
    /// # Errors
    ///
    /// Propagates `QuizSession::jump_to` errors and local store read failures.
    pub async fn back_to_my_place(&self, session: &mut QuizSession) -> Result<usize, QuizError> {
        let index = session.resume_index(self.saved_position(session).await?);
        session.jump_to(index)?;
        Ok(index)
    }

    /// Back from review to the last saved position.
    ///
    /// # Errors
    ///
    /// Propagates stage errors and local store read failures.
    pub async fn resume_quiz(&self, session: &mut QuizSession) -> Result<usize, QuizError> {
        let saved = self.saved_position(session).await?;
        session.resume_quiz(saved)
    }

    async fn saved_position(&self, session: &QuizSession) -> Result<Option<QuestionId>, QuizError> {
        Ok(self
            .store
            .load_session(session.student(), session.category())
            .await?
            .and_then(|record| record.current_question_id))
    }

    /// Move to the result page and report the score once.
    ///
    /// The result record is posted until it succeeds; the mail follows the
    /// first successful post and its failure is only logged. Calling again
    /// after success returns the same score without any request.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stage` unless the session is in review or already
    /// on the result page.
    pub async fn finish(
        &self,
        student: &Student,
        session: &mut QuizSession,
    ) -> Result<FinishOutcome, QuizError> {
        if session.stage() != Stage::Result {
            session.show_result()?;
        }
        let score = session.score();
        if session.result_submitted() {
            return Ok(FinishOutcome {
                score,
                submitted: true,
            });
        }

        if let Err(err) = self
            .api
            .submit_result(&ResultSubmission::new(student, &score))
            .await
        {
            warn!(student = %student.id, error = %err, "result submission failed");
            return Ok(FinishOutcome {
                score,
                submitted: false,
            });
        }
        session.mark_result_submitted();
        info!(
            student = %student.id,
            category = %session.category(),
            percentage = %score.percentage_label(),
            "result submitted"
        );

        if let Err(err) = self
            .api
            .send_result_mail(&ResultMail::new(student, &score))
            .await
        {
            warn!(student = %student.id, error = %err, "result mail failed");
        }

        Ok(FinishOutcome {
            score,
            submitted: true,
        })
    }

    //
    // ─── MIRRORING ─────────────────────────────────────────────────────────────
    //

    async fn mirror_position(&self, session: &QuizSession) {
        let current = session.current_question().map(|q| q.id);
        if let Err(err) = self
            .store
            .save_position(session.student(), session.category(), current)
            .await
        {
            warn!(error = %err, "failed to save quiz position");
        }
    }

    async fn mirror_finalized(&self, session: &QuizSession) {
        if let Err(err) = self
            .store
            .save_finalized(session.student(), session.category(), session.finalized())
            .await
        {
            warn!(error = %err, "failed to save locked questions");
        }
    }

    async fn push_progress(&self, session: &QuizSession) {
        let update = ProgressUpdate {
            student_id: session.student(),
            category: session.category().clone(),
            current_index: session.current_index(),
            user_answers: session.answers().clone(),
        };
        if let Err(err) = self.api.save_progress(&update).await {
            warn!(category = %session.category(), error = %err, "progress upsert failed");
        }
    }
}
