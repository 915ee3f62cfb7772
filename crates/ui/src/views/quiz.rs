use std::time::Duration;

use dioxus::prelude::*;
use quiz_core::model::QuestionId;
use services::{QuizProgress, QuizSession};

use crate::views::questions::QuizIntent;
use crate::vm::{QuestionVm, format_elapsed};

/// Snapshot of the quiz stage, detached from the session signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizPanelData {
    pub category: String,
    pub question: QuestionVm,
    pub progress: QuizProgress,
    /// Subset indices behind the correct / incorrect counters.
    pub correct: Vec<usize>,
    pub incorrect: Vec<usize>,
}

impl QuizPanelData {
    #[must_use]
    pub fn from_session(session: &QuizSession, media_base: &str) -> Option<Self> {
        let question = QuestionVm::current(session, media_base)?;
        let tally = session.tally();
        let indices = |ids: &[QuestionId]| -> Vec<usize> {
            ids.iter().filter_map(|id| session.index_of(*id)).collect()
        };
        Some(Self {
            category: session.category().to_string(),
            question,
            progress: session.progress(),
            correct: indices(&tally.correct),
            incorrect: indices(&tally.incorrect),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TallyKind {
    Correct,
    Wrong,
}

#[component]
pub fn QuizPanel(
    data: QuizPanelData,
    on_intent: Callback<QuizIntent>,
    on_report: Callback<(usize, String)>,
) -> Element {
    let mut solution_for = use_signal(|| None::<QuestionId>);
    let mut open_panel = use_signal(|| None::<TallyKind>);
    let mut in_section = use_signal(|| false);
    let mut show_report = use_signal(|| false);

    let question = data.question;
    let question_id = question.id;
    let question_number = question.number;
    let show_solution = solution_for() == Some(question_id);
    let correct_count = data.correct.len();
    let wrong_count = data.incorrect.len();
    let panel = open_panel().map(|kind| match kind {
        TallyKind::Correct => ("✅ الأسئلة الصحيحة", data.correct.clone()),
        TallyKind::Wrong => ("❌ الأسئلة الخاطئة", data.incorrect.clone()),
    });

    rsx! {
        section { class: "quiz",
            header { class: "quiz-header",
                h2 { "{data.category}" }
                span { class: "position", "{question.position_label()}" }
                QuizTimer {}
            }

            div { class: "question-content", dangerous_inner_html: "{question.content_html}" }

            div { class: "answers",
                for answer in question.answers.iter().cloned() {
                    button {
                        key: "{answer.index}",
                        class: answer.state.class(),
                        r#type: "button",
                        disabled: answer.state.is_disabled(),
                        dangerous_inner_html: "{answer.html}",
                        onclick: move |_| on_intent.call(QuizIntent::Answer(answer.index)),
                    }
                }
            }

            if question.locked {
                if let Some(solution) = question.solution_html.clone() {
                    div { class: "solution",
                        button {
                            r#type: "button",
                            onclick: move |_| {
                                let next = (!show_solution).then_some(question_id);
                                solution_for.set(next);
                            },
                            "طريقة الحل"
                        }
                        if show_solution {
                            h4 { "📘 الشرح:" }
                            div { dangerous_inner_html: "{solution}" }
                        }
                    }
                }
            }

            footer { class: "quiz-footer",
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    "السابق"
                }
                button {
                    class: "counter counter--correct",
                    r#type: "button",
                    onclick: move |_| open_panel.set(Some(TallyKind::Correct)),
                    "{correct_count} صح"
                }
                button {
                    class: "counter counter--wrong",
                    r#type: "button",
                    onclick: move |_| open_panel.set(Some(TallyKind::Wrong)),
                    "{wrong_count} خطأ"
                }
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "التالي"
                }
            }

            if in_section() {
                button {
                    class: "back-to-place",
                    r#type: "button",
                    onclick: move |_| {
                        in_section.set(false);
                        on_intent.call(QuizIntent::BackToMyPlace);
                    },
                    "رجوع لمكاني"
                }
            }

            div { class: "quiz-actions",
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::EndTraining),
                    "🏁 إنهاء التدريب"
                }
                button {
                    r#type: "button",
                    onclick: move |_| show_report.set(true),
                    "🚩 الإبلاغ عن خطأ"
                }
            }

            if let Some((title, indices)) = panel {
                TallyPanel {
                    title,
                    indices,
                    on_jump: move |index: usize| {
                        open_panel.set(None);
                        in_section.set(true);
                        on_intent.call(QuizIntent::JumpTo(index));
                    },
                    on_close: move |()| {
                        open_panel.set(None);
                        in_section.set(false);
                    },
                }
            }

            if show_report() {
                ReportModal {
                    question_number,
                    on_submit: move |message: String| {
                        show_report.set(false);
                        on_report.call((question_number, message));
                    },
                    on_close: move |()| show_report.set(false),
                }
            }
        }
    }
}

/// Elapsed time since the quiz stage was shown.
#[component]
fn QuizTimer() -> Element {
    let mut seconds = use_signal(|| 0_u64);
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            *seconds.write() += 1;
        }
    });

    rsx! {
        span { class: "timer", "{format_elapsed(seconds())}" }
    }
}

#[component]
pub fn TallyPanel(
    title: &'static str,
    indices: Vec<usize>,
    on_jump: Callback<usize>,
    on_close: Callback<()>,
) -> Element {
    rsx! {
        aside { class: "tally-panel",
            header {
                h3 { "{title}" }
                button { r#type: "button", onclick: move |_| on_close.call(()), "✕" }
            }
            if indices.is_empty() {
                p { "لا توجد أسئلة" }
            }
            ul {
                for index in indices {
                    li { key: "{index}",
                        button {
                            r#type: "button",
                            onclick: move |_| on_jump.call(index),
                            "سؤال {index + 1}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ReportModal(
    question_number: usize,
    on_submit: Callback<String>,
    on_close: Callback<()>,
) -> Element {
    let mut text = use_signal(String::new);

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                h3 { "الإبلاغ عن خطأ" }
                p {
                    strong { "السؤال رقم:" }
                    " {question_number}"
                }
                label { "ملاحظتك" }
                textarea {
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                }
                div { class: "modal-actions",
                    button {
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "إلغاء"
                    }
                    button {
                        r#type: "button",
                        onclick: move |_| on_submit.call(text()),
                        "إرسال البلاغ"
                    }
                }
            }
        }
    }
}
