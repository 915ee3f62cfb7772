use quiz_core::model::QuizScore;

/// Final score panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub percentage: String,
    /// `false` while the result record has not reached the backend.
    pub submitted: bool,
}

impl ResultVm {
    #[must_use]
    pub fn new(score: &QuizScore, submitted: bool) -> Self {
        Self {
            total: score.total(),
            correct: score.correct(),
            wrong: score.wrong(),
            percentage: score.percentage_label(),
            submitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_score_fields() {
        let vm = ResultVm::new(&QuizScore::new(7, 10), true);
        assert_eq!(vm.correct, 7);
        assert_eq!(vm.wrong, 3);
        assert_eq!(vm.percentage, "70.0");
    }
}
