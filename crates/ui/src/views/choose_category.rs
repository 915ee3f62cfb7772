use dioxus::prelude::*;
use quiz_core::ReviewFilter;
use quiz_core::model::{Category, CategoryFilter, CategorySummary};

use crate::views::ViewState;
use crate::vm::{CategoryCardVm, filter_label, map_category_cards, parse_requested_count};

#[component]
pub fn ChooseCategory(
    state: ViewState<Vec<CategorySummary>>,
    filter: CategoryFilter,
    on_filter: Callback<CategoryFilter>,
    on_enter: Callback<(Category, usize)>,
    on_reset: Callback<(Category, usize)>,
    on_review: Callback<(Category, ReviewFilter)>,
) -> Element {
    rsx! {
        section { class: "choose-category",
            h2 { "🎯 اختر بنك الأسئلة" }
            div { class: "filters",
                for option in CategoryFilter::ALL {
                    button {
                        key: "{filter_label(option)}",
                        class: if option == filter { "filter filter--active" } else { "filter" },
                        r#type: "button",
                        onclick: move |_| on_filter.call(option),
                        "{filter_label(option)}"
                    }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "⏳ جاري تحميل البنوك..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(summaries) => rsx! {
                    div { class: "category-grid",
                        for card in map_category_cards(&summaries, filter) {
                            CategoryCard {
                                key: "{card.category}",
                                card: card.clone(),
                                on_enter,
                                on_reset,
                                on_review,
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn CategoryCard(
    card: CategoryCardVm,
    on_enter: Callback<(Category, usize)>,
    on_reset: Callback<(Category, usize)>,
    on_review: Callback<(Category, ReviewFilter)>,
) -> Element {
    let default_requested = card.default_requested();
    let mut requested = use_signal(|| default_requested.to_string());
    let requested_count = parse_requested_count(&requested(), default_requested);

    let enter_category = card.category.clone();
    let reset_category = card.category.clone();
    let correct_category = card.category.clone();
    let wrong_category = card.category.clone();

    rsx! {
        div { class: "category-card",
            h3 { "{card.category}" }
            p { "عدد الأسئلة في هذا البنك: {card.total}" }
            div { class: "counts",
                button {
                    class: "count count--correct",
                    r#type: "button",
                    onclick: move |_| on_review.call((correct_category.clone(), ReviewFilter::Correct)),
                    "✅ صحيح: {card.correct}"
                }
                button {
                    class: "count count--wrong",
                    r#type: "button",
                    onclick: move |_| on_review.call((wrong_category.clone(), ReviewFilter::Wrong)),
                    "❌ خطأ: {card.incorrect}"
                }
                span { class: "count", "📝 المتبقي: {card.remaining}" }
            }
            label {
                "عدد الأسئلة التي تريد حلها:"
                input {
                    r#type: "number",
                    min: "1",
                    value: "{requested}",
                    oninput: move |evt| requested.set(evt.value()),
                }
            }
            button {
                class: "start",
                r#type: "button",
                onclick: move |_| on_enter.call((enter_category.clone(), requested_count)),
                "{card.start_label()}"
            }
            if card.has_started {
                button {
                    class: "reset",
                    r#type: "button",
                    onclick: move |_| on_reset.call((reset_category.clone(), requested_count)),
                    "إعادة الاختبار"
                }
            }
        }
    }
}
