mod answer_review;
mod choose_category;
mod intro;
mod login;
mod print_sheet;
mod questions;
mod quiz;
mod result;
mod review;
mod state;

#[cfg(test)]
mod view_smoke;

pub use answer_review::{AnswerReviewList, AnswerReviewView};
pub use choose_category::{CategoryCard, ChooseCategory};
pub use intro::IntroPanel;
pub use login::LoginView;
pub use print_sheet::{PrintSheet, PrintSheetView};
pub use questions::{IntentEffect, QuestionsView, QuizIntent, run_intent};
pub use quiz::{QuizPanel, QuizPanelData, ReportModal, TallyPanel};
pub use result::ResultPanel;
pub use review::{QuestionReadout, ReviewAll, ReviewGrid, ReviewQuestion};
pub use state::{ViewError, ViewState, view_state_from_resource};
