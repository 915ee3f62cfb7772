use dioxus::prelude::*;
use quiz_core::model::PrintItem;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::render_safe;

const ANSWER_LETTERS: [&str; 4] = ["أ", "ب", "ج", "د"];
const DEFAULT_FONT_SIZE: u32 = 18;

fn answer_letter(index: usize) -> String {
    ANSWER_LETTERS
        .get(index)
        .map_or_else(|| (index + 1).to_string(), |letter| (*letter).to_string())
}

/// `/print`: the distribution-driven question sheet, laid out for printing.
#[component]
pub fn PrintSheetView() -> Element {
    let ctx = use_context::<AppContext>();
    let media_base = ctx.media_base().to_string();
    let mut one_per_page = use_signal(|| true);
    let mut font_size = use_signal(|| DEFAULT_FONT_SIZE);

    let resource = {
        let sheet = ctx.print_sheet();
        use_resource(move || {
            let sheet = sheet.clone();
            async move {
                sheet.load().await.map_err(|err| {
                    warn!(error = %err, "failed to load print sheet");
                    ViewError::Unknown
                })
            }
        })
    };
    let state = view_state_from_resource(resource);

    rsx! {
        section { class: "print-sheet",
            div { class: "print-controls",
                label {
                    "🔠 حجم الخط: "
                    input {
                        r#type: "number",
                        min: "10",
                        max: "40",
                        value: "{font_size}",
                        oninput: move |evt: FormEvent| {
                            if let Ok(size) = evt.value().trim().parse::<u32>() {
                                font_size.set(size.clamp(10, 40));
                            }
                        },
                    }
                }
                label {
                    "📄 وضع الطباعة: "
                    select {
                        onchange: move |evt: FormEvent| one_per_page.set(evt.value() == "per-question"),
                        option { value: "per-question", selected: one_per_page(), "سؤال في صفحة" }
                        option { value: "multi", selected: !one_per_page(), "عدة أسئلة في صفحة" }
                    }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "جاري تحميل الأسئلة... ⏳" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(items) => rsx! {
                    PrintSheet {
                        items,
                        media_base: media_base.clone(),
                        one_per_page: one_per_page(),
                        font_size: font_size(),
                    }
                },
            }
        }
    }
}

#[component]
pub fn PrintSheet(
    items: Vec<PrintItem>,
    media_base: String,
    one_per_page: bool,
    font_size: u32,
) -> Element {
    let card_class = if one_per_page {
        "print-card page-break"
    } else {
        "print-card"
    };
    let style = format!("font-size: {font_size}px;");

    rsx! {
        if items.is_empty() {
            p { "لا توجد أسئلة للطباعة." }
        }
        for item in items {
            article {
                key: "{item.question.id}",
                class: card_class,
                style: style.clone(),
                div {
                    class: "question-content",
                    dangerous_inner_html: render_safe(&item.question.content, &media_base),
                }
                ol { class: "print-answers",
                    for (index, answer) in item.question.answers.iter().enumerate() {
                        li { key: "{index}",
                            span { class: "letter", "{answer_letter(index)}" }
                            span { dangerous_inner_html: render_safe(&answer.text, &media_base) }
                        }
                    }
                }
                p { class: "print-key",
                    "الإجابة الصحيحة: {answer_letter(item.correct_index)}"
                }
            }
        }
    }
}
