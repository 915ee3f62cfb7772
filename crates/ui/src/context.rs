use std::sync::Arc;

use services::{
    AnswerReviewService, AppServices, LoginService, PrintSheetService, QuizLoopService,
    ReportService,
};

/// Services the views need, provided by the composition root.
pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn login(&self) -> Arc<LoginService>;
    fn reports(&self) -> Arc<ReportService>;
    fn answer_review(&self) -> Arc<AnswerReviewService>;
    fn print_sheet(&self) -> Arc<PrintSheetService>;

    /// Base URL that relative image paths in question HTML resolve against.
    fn media_base(&self) -> String;
}

impl UiApp for AppServices {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        AppServices::quiz_loop(self)
    }

    fn login(&self) -> Arc<LoginService> {
        AppServices::login(self)
    }

    fn reports(&self) -> Arc<ReportService> {
        AppServices::reports(self)
    }

    fn answer_review(&self) -> Arc<AnswerReviewService> {
        AppServices::answer_review(self)
    }

    fn print_sheet(&self) -> Arc<PrintSheetService> {
        AppServices::print_sheet(self)
    }

    fn media_base(&self) -> String {
        self.config().media_base().to_string()
    }
}

#[derive(Clone)]
pub struct AppContext {
    media_base: Arc<str>,

    quiz_loop: Arc<QuizLoopService>,
    login: Arc<LoginService>,
    reports: Arc<ReportService>,
    answer_review: Arc<AnswerReviewService>,
    print_sheet: Arc<PrintSheetService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            media_base: app.media_base().into(),
            quiz_loop: app.quiz_loop(),
            login: app.login(),
            reports: app.reports(),
            answer_review: app.answer_review(),
            print_sheet: app.print_sheet(),
        }
    }

    #[must_use]
    pub fn media_base(&self) -> &str {
        &self.media_base
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn login(&self) -> Arc<LoginService> {
        Arc::clone(&self.login)
    }

    #[must_use]
    pub fn reports(&self) -> Arc<ReportService> {
        Arc::clone(&self.reports)
    }

    #[must_use]
    pub fn answer_review(&self) -> Arc<AnswerReviewService> {
        Arc::clone(&self.answer_review)
    }

    #[must_use]
    pub fn print_sheet(&self) -> Arc<PrintSheetService> {
        Arc::clone(&self.print_sheet)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
