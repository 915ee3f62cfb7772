use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rng};
use std::collections::HashSet;

use quiz_core::model::{QuestionBank, QuestionId, SessionRecord};

use crate::error::PlanError;

//
// ─── SAMPLERS ──────────────────────────────────────────────────────────────────
//

/// Source of randomness for subset selection.
pub trait Sampler: Send {
    /// Reorder `ids` in place.
    fn shuffle(&mut self, ids: &mut [QuestionId]);
}

/// Uniform shuffle backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSampler;

impl Sampler for RandomSampler {
    fn shuffle(&mut self, ids: &mut [QuestionId]) {
        ids.shuffle(&mut rng());
    }
}

/// Reproducible shuffle for tests and debugging.
#[derive(Debug, Clone)]
pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for SeededSampler {
    fn shuffle(&mut self, ids: &mut [QuestionId]) {
        ids.shuffle(&mut self.rng);
    }
}

/// Keeps backend order.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySampler;

impl Sampler for IdentitySampler {
    fn shuffle(&mut self, _ids: &mut [QuestionId]) {}
}

//
// ─── PLAN ──────────────────────────────────────────────────────────────────────
//

/// How the working subset was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    /// Reused the persisted id list.
    Resumed,
    /// Sampled the requested count from unanswered questions.
    Unanswered,
    /// Fewer unanswered questions than requested; took all of them.
    Remaining,
    /// Everything was answered; sampled from the whole bank.
    Replay,
}

/// Selection result for a quiz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPlan {
    pub ids: Vec<QuestionId>,
    pub mode: PlanMode,
    pub start_index: usize,
}

impl QuizPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the question the student lands on.
    #[must_use]
    pub fn start_question(&self) -> Option<QuestionId> {
        self.ids.get(self.start_index).copied()
    }
}

/// Picks the working subset of a category.
pub struct QuizPlanBuilder<'a> {
    bank: &'a QuestionBank,
    saved: Option<&'a SessionRecord>,
}

impl<'a> QuizPlanBuilder<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank, saved: None }
    }

    /// Prefer a persisted subset over fresh sampling.
    #[must_use]
    pub fn with_saved(mut self, saved: Option<&'a SessionRecord>) -> Self {
        self.saved = saved;
        self
    }

    /// Build the plan.
    ///
    /// - A saved id list, filtered to ids still in the bank, is reused as-is.
    /// - Otherwise `requested` unanswered questions are sampled; if fewer remain,
    ///   all of them are taken without backfill; if none remain, `requested`
    ///   questions are sampled from the whole bank.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NoQuestions` for an empty bank and
    /// `PlanError::InvalidCount` when `requested` is 0.
    pub fn build(
        self,
        requested: usize,
        answered: &HashSet<QuestionId>,
        sampler: &mut dyn Sampler,
    ) -> Result<QuizPlan, PlanError> {
        if self.bank.is_empty() {
            return Err(PlanError::NoQuestions);
        }
        if requested == 0 {
            return Err(PlanError::InvalidCount);
        }

        if let Some(ids) = self.saved_ids() {
            let start_index = self.start_index(&ids, answered);
            return Ok(QuizPlan {
                ids,
                mode: PlanMode::Resumed,
                start_index,
            });
        }

        let mut unanswered: Vec<QuestionId> = self
            .bank
            .questions()
            .iter()
            .map(|q| q.id)
            .filter(|id| !answered.contains(id))
            .collect();

        let (ids, mode) = if unanswered.len() >= requested {
            sampler.shuffle(&mut unanswered);
            unanswered.truncate(requested);
            (unanswered, PlanMode::Unanswered)
        } else if !unanswered.is_empty() {
            (unanswered, PlanMode::Remaining)
        } else {
            let mut all = self.bank.ids();
            sampler.shuffle(&mut all);
            all.truncate(requested);
            (all, PlanMode::Replay)
        };

        let start_index = self.start_index(&ids, answered);
        Ok(QuizPlan {
            ids,
            mode,
            start_index,
        })
    }

    fn saved_ids(&self) -> Option<Vec<QuestionId>> {
        let saved = self.saved.filter(|record| record.has_subset())?;
        let mut seen = HashSet::new();
        let ids: Vec<QuestionId> = saved
            .ids
            .iter()
            .copied()
            .filter(|id| self.bank.contains(*id) && seen.insert(*id))
            .collect();
        (!ids.is_empty()).then_some(ids)
    }

    fn start_index(&self, ids: &[QuestionId], answered: &HashSet<QuestionId>) -> usize {
        let saved_current = self
            .saved
            .and_then(|record| record.current_question_id)
            .and_then(|current| ids.iter().position(|id| *id == current));
        saved_current
            .or_else(|| ids.iter().position(|id| !answered.contains(id)))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quiz_core::model::{Answer, Category, Question};

    fn bank(n: u64) -> QuestionBank {
        let questions = (1..=n)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    format!("<p>q{id}</p>"),
                    vec![Answer::new("a", true), Answer::new("b", false)],
                )
            })
            .collect();
        QuestionBank::from_questions(Category::new("A").unwrap(), questions)
    }

    fn ids(range: impl IntoIterator<Item = u64>) -> HashSet<QuestionId> {
        range.into_iter().map(QuestionId::new).collect()
    }

    #[test]
    fn samples_requested_count_from_unanswered() {
        let bank = bank(10);
        let answered = ids(1..=3);
        let plan = QuizPlanBuilder::new(&bank)
            .build(5, &answered, &mut SeededSampler::new(7))
            .unwrap();

        assert_eq!(plan.mode, PlanMode::Unanswered);
        assert_eq!(plan.len(), 5);
        assert!(plan.ids.iter().all(|id| !answered.contains(id)));
        assert_eq!(plan.start_index, 0);
    }

    #[test]
    fn takes_all_remaining_without_backfill() {
        let bank = bank(10);
        let answered = ids(1..=3);
        let plan = QuizPlanBuilder::new(&bank)
            .build(10, &answered, &mut IdentitySampler)
            .unwrap();

        assert_eq!(plan.mode, PlanMode::Remaining);
        assert_eq!(plan.ids, (4..=10).map(QuestionId::new).collect::<Vec<_>>());
    }

    #[test]
    fn replays_whole_bank_when_everything_answered() {
        let bank = bank(6);
        let answered = ids(1..=6);
        let plan = QuizPlanBuilder::new(&bank)
            .build(4, &answered, &mut SeededSampler::new(1))
            .unwrap();

        assert_eq!(plan.mode, PlanMode::Replay);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.start_index, 0);
    }

    #[test]
    fn saved_subset_wins_and_keeps_order() {
        let bank = bank(10);
        let saved = SessionRecord::new(
            vec![QuestionId::new(9), QuestionId::new(2), QuestionId::new(5)],
            Some(QuestionId::new(5)),
        );
        let plan = QuizPlanBuilder::new(&bank)
            .with_saved(Some(&saved))
            .build(3, &HashSet::new(), &mut SeededSampler::new(3))
            .unwrap();

        assert_eq!(plan.mode, PlanMode::Resumed);
        assert_eq!(plan.ids, saved.ids);
        assert_eq!(plan.start_index, 2);
        assert_eq!(plan.start_question(), Some(QuestionId::new(5)));
    }

    #[test]
    fn saved_ids_missing_from_bank_are_dropped() {
        let bank = bank(3);
        let saved = SessionRecord::new(vec![QuestionId::new(40), QuestionId::new(2)], None);
        let plan = QuizPlanBuilder::new(&bank)
            .with_saved(Some(&saved))
            .build(3, &ids([2]), &mut IdentitySampler)
            .unwrap();
        assert_eq!(plan.ids, vec![QuestionId::new(2)]);

        let stale = SessionRecord::new(vec![QuestionId::new(40)], None);
        let plan = QuizPlanBuilder::new(&bank)
            .with_saved(Some(&stale))
            .build(2, &HashSet::new(), &mut IdentitySampler)
            .unwrap();
        assert_eq!(plan.mode, PlanMode::Unanswered);
    }

    #[test]
    fn start_falls_back_to_first_unanswered() {
        let bank = bank(4);
        let saved = SessionRecord::new(
            vec![QuestionId::new(1), QuestionId::new(2), QuestionId::new(3)],
            Some(QuestionId::new(4)),
        );
        let plan = QuizPlanBuilder::new(&bank)
            .with_saved(Some(&saved))
            .build(3, &ids([1]), &mut IdentitySampler)
            .unwrap();
        assert_eq!(plan.start_index, 1);
    }

    #[test]
    fn rejects_empty_bank_and_zero_count() {
        let empty = QuestionBank::from_questions(Category::new("A").unwrap(), Vec::new());
        assert_eq!(
            QuizPlanBuilder::new(&empty).build(5, &HashSet::new(), &mut IdentitySampler),
            Err(PlanError::NoQuestions)
        );
        assert_eq!(
            QuizPlanBuilder::new(&bank(2)).build(0, &HashSet::new(), &mut IdentitySampler),
            Err(PlanError::InvalidCount)
        );
    }

    proptest! {
        #[test]
        fn selection_size_and_membership(
            total in 1u64..40,
            answered_count in 0u64..40,
            requested in 1usize..50,
            seed in any::<u64>(),
        ) {
            let bank = bank(total);
            let answered = ids(1..=answered_count.min(total));
            let unanswered = bank.len() - answered.len();

            let plan = QuizPlanBuilder::new(&bank)
                .build(requested, &answered, &mut SeededSampler::new(seed))
                .unwrap();

            let unique: HashSet<_> = plan.ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), plan.len());
            prop_assert!(plan.ids.iter().all(|id| bank.contains(*id)));

            if unanswered >= requested {
                prop_assert_eq!(plan.len(), requested);
                prop_assert!(plan.ids.iter().all(|id| !answered.contains(id)));
            } else if unanswered > 0 {
                prop_assert_eq!(plan.len(), unanswered);
                prop_assert!(plan.ids.iter().all(|id| !answered.contains(id)));
            } else {
                prop_assert_eq!(plan.len(), requested.min(bank.len()));
            }
            prop_assert!(plan.start_index < plan.len());
        }
    }
}
