use dioxus::prelude::*;

use crate::views::questions::QuizIntent;
use crate::vm::{QuestionVm, ReviewCellVm};

#[component]
pub fn ReviewGrid(cells: Vec<ReviewCellVm>, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        section { class: "review",
            h2 { "📋 مراجعة الأسئلة" }
            p { "تابع تقدمك واختر أي سؤال للرجوع إليه" }
            div { class: "review-grid",
                for cell in cells {
                    button {
                        key: "{cell.index}",
                        class: cell.class(),
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::OpenQuestion(cell.index)),
                        h5 { "سؤال {cell.index + 1}" }
                        span { class: "badge", "{cell.status_label()}" }
                    }
                }
            }
            div { class: "review-actions",
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::ResumeQuiz),
                    "رجوع لمكاني"
                }
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Finish),
                    "🏁 عرض النتيجة"
                }
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::ShowAll),
                    "📖 مراجعة الكل"
                }
            }
        }
    }
}

#[component]
pub fn ReviewAll(questions: Vec<QuestionVm>, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        section { class: "review-all",
            h2 { "📋 مراجعة كل الأسئلة" }
            for question in questions {
                article { key: "{question.id}",
                    h5 { "سؤال {question.number}" }
                    QuestionReadout { question: question.clone() }
                }
            }
            button {
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::BackToReview),
                "⬅ الرجوع لقائمة المراجعة"
            }
        }
    }
}

#[component]
pub fn ReviewQuestion(question: QuestionVm, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        section { class: "review-question",
            h4 { "مراجعة السؤال {question.number}" }
            QuestionReadout { question: question.clone() }
            button {
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::BackToReview),
                "⬅ الرجوع لقائمة الأسئلة"
            }
        }
    }
}

/// Read-only question with the correct and chosen answers marked.
#[component]
pub fn QuestionReadout(question: QuestionVm) -> Element {
    rsx! {
        div { class: "question-content", dangerous_inner_html: "{question.content_html}" }
        ul { class: "answers",
            for answer in question.answers {
                li {
                    key: "{answer.index}",
                    class: answer.state.class(),
                    dangerous_inner_html: "{answer.html}",
                }
            }
        }
        if let Some(solution) = question.solution_html {
            div { class: "solution",
                h6 { "📘 الشرح:" }
                div { dangerous_inner_html: "{solution}" }
            }
        }
    }
}
