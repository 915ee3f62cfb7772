use dioxus::prelude::*;

#[component]
pub fn IntroPanel(count: usize, on_start: Callback<()>) -> Element {
    rsx! {
        section { class: "intro",
            h2 { "📝 الاختبار يتكون من {count} سؤال" }
            button {
                class: "start",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "🚀 ابدأ الاختبار"
            }
        }
    }
}
