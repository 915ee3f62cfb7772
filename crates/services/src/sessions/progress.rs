/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// Questions in the working subset.
    pub total: usize,
    /// 1-based position of the current question.
    pub position: usize,
    pub answered: usize,
    /// Answered or locked as skipped.
    pub finalized: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.finalized)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position == self.total
    }
}
