use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{AnswerReviewView, LoginView, PrintSheetView, QuestionsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LoginView)] Login {},
        #[route("/questions", QuestionsView)] Questions {},
        #[route("/review/:category/:kind", AnswerReviewView)] AnswerReview { category: String, kind: String },
        #[route("/print", PrintSheetView)] Print {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "content",
            Outlet::<Route> {}
        }
    }
}
