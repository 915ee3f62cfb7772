use quiz_core::model::{Question, QuestionId};
use services::QuizSession;

use super::html::render_safe;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerState {
    /// Clickable; the question is still open.
    Open,
    /// Locked and neither selected nor correct.
    Locked,
    Correct,
    Wrong,
}

impl AnswerState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "answer",
            Self::Locked => "answer locked",
            Self::Correct => "answer correct",
            Self::Wrong => "answer wrong",
        }
    }

    #[must_use]
    pub fn is_disabled(self) -> bool {
        self != Self::Open
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerButtonVm {
    pub index: usize,
    pub html: String,
    pub state: AnswerState,
}

/// A question ready for display, with sanitized HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    /// 1-based position in the subset.
    pub number: usize,
    pub total: usize,
    pub content_html: String,
    pub answers: Vec<AnswerButtonVm>,
    pub solution_html: Option<String>,
    pub selected: Option<usize>,
    pub locked: bool,
}

impl QuestionVm {
    /// Build the view of `question`. Once `locked`, the correct answer is
    /// highlighted and a wrong selection is marked.
    #[must_use]
    pub fn new(
        question: &Question,
        index: usize,
        total: usize,
        selected: Option<usize>,
        locked: bool,
        media_base: &str,
    ) -> Self {
        let answers = question
            .answers
            .iter()
            .enumerate()
            .map(|(ix, answer)| {
                let state = if !locked {
                    AnswerState::Open
                } else if answer.is_correct {
                    AnswerState::Correct
                } else if selected == Some(ix) {
                    AnswerState::Wrong
                } else {
                    AnswerState::Locked
                };
                AnswerButtonVm {
                    index: ix,
                    html: render_safe(&answer.text, media_base),
                    state,
                }
            })
            .collect();

        Self {
            id: question.id,
            number: index + 1,
            total,
            content_html: render_safe(&question.content, media_base),
            answers,
            solution_html: question
                .solution
                .as_deref()
                .filter(|_| question.has_solution())
                .map(|solution| render_safe(solution, media_base)),
            selected,
            locked,
        }
    }

    /// The question at the session's current position.
    #[must_use]
    pub fn current(session: &QuizSession, media_base: &str) -> Option<Self> {
        let question = session.current_question()?;
        Some(Self::new(
            question,
            session.current_index(),
            session.len(),
            session.answers().get(question.id),
            session.is_locked(question.id),
            media_base,
        ))
    }

    /// The question at `index`, as shown on the review pages.
    #[must_use]
    pub fn at(session: &QuizSession, index: usize, media_base: &str) -> Option<Self> {
        let question = session.questions().get(index)?;
        Some(Self::new(
            question,
            index,
            session.len(),
            session.answers().get(question.id),
            true,
            media_base,
        ))
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("السؤال {} من {}", self.number, self.total)
    }
}

/// One tile on the review grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReviewCellVm {
    pub index: usize,
    pub answered: bool,
    pub correct: bool,
}

impl ReviewCellVm {
    #[must_use]
    pub fn class(self) -> &'static str {
        match (self.answered, self.correct) {
            (true, true) => "review-cell correct",
            (true, false) => "review-cell wrong",
            (false, _) => "review-cell",
        }
    }

    #[must_use]
    pub fn status_label(self) -> &'static str {
        if self.answered { "تم" } else { "لم يتم" }
    }
}

#[must_use]
pub fn map_review_cells(session: &QuizSession) -> Vec<ReviewCellVm> {
    session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = session.answers().get(question.id);
            ReviewCellVm {
                index,
                answered: selected.is_some(),
                correct: selected.is_some_and(|ix| question.is_correct_choice(ix)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Answer;

    fn question() -> Question {
        Question::new(
            QuestionId::new(7),
            "<p>2 + 2?</p>",
            vec![Answer::new("3", false), Answer::new("4", true), Answer::new("5", false)],
        )
        .with_solution("<b>4</b>")
    }

    #[test]
    fn open_question_has_clickable_answers() {
        let vm = QuestionVm::new(&question(), 0, 5, None, false, "https://m");
        assert!(vm.answers.iter().all(|a| a.state == AnswerState::Open));
        assert_eq!(vm.position_label(), "السؤال 1 من 5");
        assert_eq!(vm.solution_html.as_deref(), Some("<b>4</b>"));
    }

    #[test]
    fn wrong_pick_marks_both_answers() {
        let vm = QuestionVm::new(&question(), 2, 5, Some(2), true, "https://m");
        let states: Vec<_> = vm.answers.iter().map(|a| a.state).collect();
        assert_eq!(
            states,
            vec![AnswerState::Locked, AnswerState::Correct, AnswerState::Wrong]
        );
        assert!(vm.answers.iter().all(|a| a.state.is_disabled()));
    }

    #[test]
    fn skipped_question_reveals_only_the_correct_answer() {
        let vm = QuestionVm::new(&question(), 0, 1, None, true, "https://m");
        let states: Vec<_> = vm.answers.iter().map(|a| a.state).collect();
        assert_eq!(
            states,
            vec![AnswerState::Locked, AnswerState::Correct, AnswerState::Locked]
        );
    }
}
