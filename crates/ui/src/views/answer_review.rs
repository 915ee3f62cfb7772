use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::ReviewFilter;
use quiz_core::model::{Category, Student};
use services::{AnswerReview, ReviewItem};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::render_safe;

/// `/review/:category/:kind`: every correct or wrong answer in a bank.
#[component]
pub fn AnswerReviewView(category: String, kind: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let media_base = ctx.media_base().to_string();
    let filter = ReviewFilter::from_slug(&kind);

    let resource = {
        let login = ctx.login();
        let reviews = ctx.answer_review();
        let category = category.clone();
        use_resource(move || {
            let login = login.clone();
            let reviews = reviews.clone();
            let category = category.clone();
            async move {
                let filter = filter.ok_or(ViewError::Unknown)?;
                let category = Category::new(category).map_err(|_| ViewError::Unknown)?;
                let student: Student = login
                    .cached_student()
                    .await
                    .map_err(ViewError::from)?
                    .ok_or(ViewError::SignedOut)?;
                reviews
                    .load(student.id, category, filter)
                    .await
                    .map_err(ViewError::from)
            }
        })
    };

    let state = view_state_from_resource(resource);
    let (title, other, other_label) = match filter {
        Some(ReviewFilter::Wrong) => ("الأسئلة الخاطئة", ReviewFilter::Correct, "عرض الصحيحة"),
        _ => ("الأسئلة الصحيحة", ReviewFilter::Wrong, "عرض الخاطئة"),
    };
    let other_route = Route::AnswerReview {
        category: category.clone(),
        kind: other.slug().to_string(),
    };

    rsx! {
        section { class: "answer-review",
            header {
                h2 { "{title} - {category}" }
                button {
                    r#type: "button",
                    onclick: move |_| {
                        navigator.push(Route::Questions {});
                    },
                    "⬅ رجوع"
                }
                button {
                    r#type: "button",
                    onclick: move |_| {
                        navigator.push(other_route.clone());
                    },
                    "{other_label}"
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "جاري تحميل الأسئلة…" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(review) => rsx! {
                    AnswerReviewList { review, media_base: media_base.clone() }
                },
            }
        }
    }
}

#[component]
pub fn AnswerReviewList(review: AnswerReview, media_base: String) -> Element {
    let empty_label = match review.filter {
        ReviewFilter::Correct => "صحيحة",
        ReviewFilter::Wrong => "خاطئة",
    };
    let shown = review.items.len();

    rsx! {
        p { "({shown} من {review.total})" }
        if review.items.is_empty() {
            p { "لا توجد أسئلة {empty_label} لديك في هذا البنك حتى الآن." }
        }
        for (position, item) in review.items.into_iter().enumerate() {
            AnswerReviewItem {
                key: "{item.question.id}",
                position: position + 1,
                item: item.clone(),
                media_base: media_base.clone(),
            }
        }
    }
}

#[component]
fn AnswerReviewItem(position: usize, item: ReviewItem, media_base: String) -> Element {
    let verdict = if item.is_correct() { "صحيح" } else { "خاطئ" };
    let content = render_safe(&item.question.content, &media_base);
    let answers: Vec<(usize, &'static str, String)> = item
        .question
        .answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let class = if index == item.correct_index {
                "answer correct"
            } else if index == item.selected {
                "answer wrong"
            } else {
                "answer"
            };
            (index, class, render_safe(&answer.text, &media_base))
        })
        .collect();

    rsx! {
        article { class: "review-item",
            span { class: "badge", "سؤال #{position}" }
            span { class: "badge", "{verdict}" }
            div { class: "question-content", dangerous_inner_html: "{content}" }
            ul { class: "answers",
                for (index, class, html) in answers {
                    li { key: "{index}", class: class, dangerous_inner_html: "{html}" }
                }
            }
        }
    }
}
