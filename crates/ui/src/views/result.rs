use dioxus::prelude::*;

use crate::views::questions::QuizIntent;
use crate::vm::ResultVm;

#[component]
pub fn ResultPanel(result: ResultVm, on_intent: Callback<QuizIntent>) -> Element {
    rsx! {
        section { class: "result",
            h2 { "📊 النتيجة النهائية" }
            ul {
                li { "📌 عدد الأسئلة: {result.total}" }
                li { "✅ الصحيحة: {result.correct}" }
                li { "❌ الخاطئة: {result.wrong}" }
                li { "🎯 النسبة: {result.percentage}%" }
            }
            if !result.submitted {
                p { class: "error", "❌ فشل في ارسال الدرجات" }
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Finish),
                    "إعادة إرسال النتيجة"
                }
            }
            div { class: "result-actions",
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "🔁 إعادة الاختبار"
                }
                button {
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::BackToCategories),
                    "⬅ الرجوع لصفحة اختيار البنوك"
                }
            }
        }
    }
}
