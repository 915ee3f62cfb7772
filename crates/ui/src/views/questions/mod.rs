mod intent;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::{ReviewFilter, Stage};
use quiz_core::model::{Category, CategoryFilter, Student};
use services::{FinishOutcome, QuizSession, RequestGate};
use tracing::{debug, warn};

pub use intent::{IntentEffect, QuizIntent, run_intent};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::choose_category::ChooseCategory;
use crate::views::intro::IntroPanel;
use crate::views::quiz::{QuizPanel, QuizPanelData};
use crate::views::result::ResultPanel;
use crate::views::review::{ReviewAll, ReviewGrid, ReviewQuestion};
use crate::views::{ViewError, view_state_from_resource};
use crate::vm::{QuestionVm, ResultVm, map_review_cells};

/// Stage-driven quiz page for the signed-in student.
#[component]
pub fn QuestionsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let media_base = ctx.media_base().to_string();

    let gate = use_hook(RequestGate::new);
    use_drop({
        let gate = gate.clone();
        move || gate.teardown()
    });

    let mut session = use_signal(|| None::<QuizSession>);
    let mut finish = use_signal(|| None::<FinishOutcome>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut notice = use_signal(|| None::<&'static str>);
    let mut filter = use_signal(CategoryFilter::default);

    let student_resource = {
        let login = ctx.login();
        use_resource(move || {
            let login = login.clone();
            async move {
                login
                    .cached_student()
                    .await
                    .map_err(ViewError::from)?
                    .ok_or(ViewError::SignedOut)
            }
        })
    };

    use_effect(move || {
        if let Some(Err(ViewError::SignedOut)) = &*student_resource.value().read() {
            navigator.replace(Route::Login {});
        }
    });

    let categories = {
        let quiz_loop = ctx.quiz_loop();
        use_resource(move || {
            let quiz_loop = quiz_loop.clone();
            let student = signed_in(student_resource);
            async move {
                match student {
                    Some(student) => quiz_loop
                        .load_categories(student.id)
                        .await
                        .map_err(ViewError::from),
                    None => Ok(Vec::new()),
                }
            }
        })
    };

    let dispatch = {
        let quiz_loop = ctx.quiz_loop();
        let gate = gate.clone();
        use_callback(move |intent: QuizIntent| {
            let Some(student) = signed_in(student_resource) else {
                return;
            };
            let Ok(token) = gate.begin() else {
                debug!(?intent, "request in flight; ignoring");
                return;
            };
            let quiz_loop = quiz_loop.clone();
            let mut slot = (*session.peek()).clone();
            let mut categories = categories;
            spawn(async move {
                let result = run_intent(&quiz_loop, &student, &mut slot, intent).await;
                let Some(result) = token.finish(result) else {
                    return;
                };
                session.set(slot);
                notice.set(None);
                match result {
                    Ok(effect) => {
                        error.set(None);
                        match effect {
                            IntentEffect::Finished(outcome) => finish.set(Some(outcome)),
                            IntentEffect::Entered => finish.set(None),
                            IntentEffect::LeftQuiz => {
                                finish.set(None);
                                categories.restart();
                            }
                            IntentEffect::None => {}
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "quiz action failed");
                        error.set(Some(ViewError::from(err)));
                    }
                }
            });
        })
    };

    let on_report = {
        let reports = ctx.reports();
        use_callback(move |(question_number, message): (usize, String)| {
            let Some(student) = signed_in(student_resource) else {
                return;
            };
            let Some(question_id) = session
                .peek()
                .as_ref()
                .and_then(QuizSession::current_question)
                .map(|q| q.id)
            else {
                return;
            };
            let reports = reports.clone();
            let number = u32::try_from(question_number).unwrap_or(u32::MAX);
            spawn(async move {
                match reports.report(&student, question_id, number, &message).await {
                    Ok(()) => notice.set(Some("✅ تم إرسال البلاغ بنجاح")),
                    Err(err) => {
                        warn!(error = %err, "question report failed");
                        error.set(Some(ViewError::from(err)));
                    }
                }
            });
        })
    };

    let on_review = use_callback(move |(category, kind): (Category, ReviewFilter)| {
        navigator.push(Route::AnswerReview {
            category: category.to_string(),
            kind: kind.slug().to_string(),
        });
    });

    let categories_state = view_state_from_resource(categories);
    let session_guard = session.read();
    let active = session_guard
        .as_ref()
        .filter(|s| s.stage() != Stage::ChooseCategory);

    let body = match active {
        None => rsx! {
            ChooseCategory {
                state: categories_state,
                filter: filter(),
                on_filter: move |next: CategoryFilter| filter.set(next),
                on_enter: move |(category, requested): (Category, usize)| {
                    dispatch.call(QuizIntent::Enter { category, requested });
                },
                on_reset: move |(category, requested): (Category, usize)| {
                    dispatch.call(QuizIntent::Reset { category, requested });
                },
                on_review,
            }
        },
        Some(active) => render_stage(active, &media_base, finish(), dispatch, on_report),
    };

    rsx! {
        div { class: "page questions",
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
            if let Some(text) = notice() {
                p { class: "notice", "{text}" }
            }
            {body}
        }
    }
}

fn signed_in(resource: Resource<Result<Student, ViewError>>) -> Option<Student> {
    resource
        .value()
        .read()
        .as_ref()
        .and_then(|value| value.as_ref().ok())
        .cloned()
}

fn render_stage(
    session: &QuizSession,
    media_base: &str,
    finish: Option<FinishOutcome>,
    dispatch: Callback<QuizIntent>,
    on_report: Callback<(usize, String)>,
) -> Element {
    match session.stage() {
        Stage::ChooseCategory => rsx! {},
        Stage::Intro => rsx! {
            IntroPanel {
                count: session.len(),
                on_start: move |()| dispatch.call(QuizIntent::Start),
            }
        },
        Stage::Quiz => match QuizPanelData::from_session(session, media_base) {
            Some(data) => rsx! {
                QuizPanel { data, on_intent: dispatch, on_report }
            },
            None => rsx! {},
        },
        Stage::Review => rsx! {
            ReviewGrid { cells: map_review_cells(session), on_intent: dispatch }
        },
        Stage::ReviewAll => rsx! {
            ReviewAll {
                questions: (0..session.len())
                    .filter_map(|index| QuestionVm::at(session, index, media_base))
                    .collect::<Vec<_>>(),
                on_intent: dispatch,
            }
        },
        Stage::ReviewQuestion { index } => match QuestionVm::at(session, index, media_base) {
            Some(question) => rsx! {
                ReviewQuestion { question, on_intent: dispatch }
            },
            None => rsx! {},
        },
        Stage::Result => {
            let result = finish.map_or_else(
                || ResultVm::new(&session.score(), session.result_submitted()),
                |outcome| ResultVm::new(&outcome.score, outcome.submitted),
            );
            rsx! {
                ResultPanel { result, on_intent: dispatch }
            }
        }
    }
}
