use std::sync::Arc;

use storage::LocalStore;
use storage::repository::Storage;

use crate::admin_service::AdminService;
use crate::api::{AdminApi, ApiConfig, HttpQuizApi, QuizApi};
use crate::error::AppServicesError;
use crate::login_service::LoginService;
use crate::print_service::PrintSheetService;
use crate::report_service::ReportService;
use crate::sessions::{AnswerReviewService, QuizLoopService};

/// Assembles app-facing services over one backend and one local store.
#[derive(Clone)]
pub struct AppServices {
    config: ApiConfig,
    store: LocalStore,
    quiz_loop: Arc<QuizLoopService>,
    login: Arc<LoginService>,
    reports: Arc<ReportService>,
    answer_review: Arc<AnswerReviewService>,
    print_sheet: Arc<PrintSheetService>,
    admin: Arc<AdminService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, config: ApiConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_http(storage, config))
    }

    /// Build services over the HTTP backend with the given storage.
    #[must_use]
    pub fn with_http(storage: Storage, config: ApiConfig) -> Self {
        let http = Arc::new(HttpQuizApi::new(config.clone()));
        let quiz_api: Arc<dyn QuizApi> = http.clone();
        let admin_api: Arc<dyn AdminApi> = http;
        Self::from_parts(config, storage, quiz_api, admin_api)
    }

    /// Build services over arbitrary backends, e.g. in-memory fakes.
    #[must_use]
    pub fn from_parts(
        config: ApiConfig,
        storage: Storage,
        quiz_api: Arc<dyn QuizApi>,
        admin_api: Arc<dyn AdminApi>,
    ) -> Self {
        let store = LocalStore::new(Arc::clone(&storage.kv));
        Self {
            quiz_loop: Arc::new(QuizLoopService::new(Arc::clone(&quiz_api), store.clone())),
            login: Arc::new(LoginService::new(Arc::clone(&quiz_api), store.clone())),
            reports: Arc::new(ReportService::new(Arc::clone(&quiz_api))),
            answer_review: Arc::new(AnswerReviewService::new(Arc::clone(&quiz_api))),
            print_sheet: Arc::new(PrintSheetService::new(quiz_api)),
            admin: Arc::new(AdminService::new(admin_api, store.clone())),
            config,
            store,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> LocalStore {
        self.store.clone()
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

    #[must_use]
    pub fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }
}
