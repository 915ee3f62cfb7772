#![allow(non_snake_case)]

use dioxus::prelude::*;
use quiz_core::ReviewFilter;
use quiz_core::model::{
    Answer, Category, CategoryFilter, CategorySummary, PrintItem, Question, QuestionId, QuizScore,
};
use services::{AnswerReview, QuizProgress, ReviewItem};

use super::*;
use crate::vm::{QuestionVm, ResultVm, ReviewCellVm};

const MEDIA: &str = "https://media.example.test/quiz/images";

fn render(root: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(root);
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

fn summary(name: &str, total: u32, answered: u32, correct: u32) -> CategorySummary {
    CategorySummary {
        total_questions: total,
        answered,
        correct,
        incorrect: answered - correct,
        ..CategorySummary::empty(Category::new(name).unwrap())
    }
}

fn question() -> Question {
    Question::new(
        QuestionId::new(9),
        r#"<p>ما ناتج 2 × 3؟</p><img src="/images/q9.png"><script>alert(1)</script>"#,
        vec![
            Answer::new("5", false),
            Answer::new("6", true),
            Answer::new("7", false),
        ],
    )
    .with_solution("<p>2 × 3 = 6</p>")
}

#[tokio::test(flavor = "current_thread")]
async fn category_picker_filters_and_labels_cards() {
    fn Root() -> Element {
        rsx! {
            ChooseCategory {
                state: ViewState::Ready(vec![
                    summary("التناظر اللفظي", 40, 10, 7),
                    summary("الجبر", 25, 0, 0),
                ]),
                filter: CategoryFilter::Verbal,
                on_filter: move |_| {},
                on_enter: move |_| {},
                on_reset: move |_| {},
                on_review: move |_| {},
            }
        }
    }

    let html = render(Root);
    assert!(html.contains("التناظر اللفظي"), "missing verbal card in {html}");
    assert!(!html.contains("الجبر"), "quantitative card leaked into {html}");
    assert!(html.contains("✅ صحيح: 7"));
    assert!(html.contains("❌ خطأ: 3"));
    assert!(html.contains("📝 المتبقي: 30"));
    assert!(html.contains("اكمل الاختبار"));
    assert!(html.contains("إعادة الاختبار"));
    assert!(html.contains(r#"value="40""#), "requested count should default to the bank size in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn category_picker_shows_loading_state() {
    fn Root() -> Element {
        rsx! {
            ChooseCategory {
                state: ViewState::Loading,
                filter: CategoryFilter::All,
                on_filter: move |_| {},
                on_enter: move |_| {},
                on_reset: move |_| {},
                on_review: move |_| {},
            }
        }
    }

    let html = render(Root);
    assert!(html.contains("جاري تحميل البنوك"));
    assert!(html.contains("الكل"));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_panel_renders_locked_question() {
    fn Root() -> Element {
        let data = QuizPanelData {
            category: "الجبر".to_string(),
            question: QuestionVm::new(&question(), 1, 5, Some(2), true, MEDIA),
            progress: QuizProgress {
                total: 5,
                position: 2,
                answered: 2,
                finalized: 2,
                correct: 1,
                incorrect: 1,
            },
            correct: vec![0],
            incorrect: vec![1],
        };
        rsx! {
            QuizPanel { data, on_intent: move |_| {}, on_report: move |_| {} }
        }
    }

    let html = render(Root);
    assert!(html.contains("السؤال 2 من 5"));
    assert!(html.contains("answer correct"));
    assert!(html.contains("answer wrong"));
    assert!(html.contains("disabled"));
    assert!(html.contains("طريقة الحل"));
    assert!(html.contains(&format!("{MEDIA}/q9.png")));
    assert!(!html.contains("<script"), "unsanitized html in {html}");
    assert!(html.contains("00:00"));
    assert!(html.contains("1 صح"));
}

#[tokio::test(flavor = "current_thread")]
async fn open_question_has_no_solution_toggle() {
    fn Root() -> Element {
        let data = QuizPanelData {
            category: "الجبر".to_string(),
            question: QuestionVm::new(&question(), 0, 1, None, false, MEDIA),
            progress: QuizProgress {
                total: 1,
                position: 1,
                answered: 0,
                finalized: 0,
                correct: 0,
                incorrect: 0,
            },
            correct: Vec::new(),
            incorrect: Vec::new(),
        };
        rsx! {
            QuizPanel { data, on_intent: move |_| {}, on_report: move |_| {} }
        }
    }

    let html = render(Root);
    assert!(!html.contains("طريقة الحل"));
    assert!(html.contains(r#"class="answer""#));
}

#[tokio::test(flavor = "current_thread")]
async fn review_grid_marks_answered_cells() {
    fn Root() -> Element {
        rsx! {
            ReviewGrid {
                cells: vec![
                    ReviewCellVm { index: 0, answered: true, correct: true },
                    ReviewCellVm { index: 1, answered: false, correct: false },
                ],
                on_intent: move |_| {},
            }
        }
    }

    let html = render(Root);
    assert!(html.contains("سؤال 1"));
    assert!(html.contains("سؤال 2"));
    assert!(html.contains("review-cell correct"));
    assert!(html.contains("لم يتم"));
    assert!(html.contains("عرض النتيجة"));
}

#[tokio::test(flavor = "current_thread")]
async fn result_panel_offers_retry_until_submitted() {
    fn Pending() -> Element {
        rsx! {
            ResultPanel { result: ResultVm::new(&QuizScore::new(7, 10), false), on_intent: move |_| {} }
        }
    }
    fn Sent() -> Element {
        rsx! {
            ResultPanel { result: ResultVm::new(&QuizScore::new(7, 10), true), on_intent: move |_| {} }
        }
    }

    let pending = render(Pending);
    assert!(pending.contains("70.0%"));
    assert!(pending.contains("إعادة إرسال النتيجة"));

    let sent = render(Sent);
    assert!(sent.contains("✅ الصحيحة: 7"));
    assert!(!sent.contains("إعادة إرسال النتيجة"));
}

#[tokio::test(flavor = "current_thread")]
async fn answer_review_list_reports_empty_filter() {
    fn Empty() -> Element {
        rsx! {
            AnswerReviewList {
                review: AnswerReview {
                    category: Category::new("الجبر").unwrap(),
                    filter: ReviewFilter::Wrong,
                    total: 12,
                    items: Vec::new(),
                },
                media_base: MEDIA.to_string(),
            }
        }
    }
    fn Filled() -> Element {
        rsx! {
            AnswerReviewList {
                review: AnswerReview {
                    category: Category::new("الجبر").unwrap(),
                    filter: ReviewFilter::Wrong,
                    total: 12,
                    items: vec![ReviewItem { question: question(), selected: 0, correct_index: 1 }],
                },
                media_base: MEDIA.to_string(),
            }
        }
    }

    let empty = render(Empty);
    assert!(empty.contains("(0 من 12)"));
    assert!(empty.contains("لا توجد أسئلة خاطئة"));

    let filled = render(Filled);
    assert!(filled.contains("سؤال #1"));
    assert!(filled.contains("خاطئ"));
    assert!(!filled.contains("<script"));
}

#[tokio::test(flavor = "current_thread")]
async fn print_sheet_letters_answers_and_breaks_pages() {
    fn Root() -> Element {
        rsx! {
            PrintSheet {
                items: vec![PrintItem {
                    category: Category::new("الجبر").unwrap(),
                    question: question(),
                    correct_index: 1,
                }],
                media_base: MEDIA.to_string(),
                one_per_page: true,
                font_size: 20,
            }
        }
    }

    let html = render(Root);
    assert!(html.contains("print-card page-break"));
    assert!(html.contains("font-size: 20px;"));
    assert!(html.contains("الإجابة الصحيحة: ب"));
    assert!(html.contains("https://media.example.test/quiz/images/q9.png"));
    assert!(!html.contains("<script"));
}
