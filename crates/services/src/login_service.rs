use std::sync::Arc;

use quiz_core::model::{Student, normalize_phone};
use storage::LocalStore;
use tracing::info;

use crate::api::QuizApi;
use crate::error::LoginError;

/// Phone-number gate in front of the quiz.
#[derive(Clone)]
pub struct LoginService {
    api: Arc<dyn QuizApi>,
    store: LocalStore,
}

impl LoginService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>, store: LocalStore) -> Self {
        Self { api, store }
    }

    /// Normalize the typed phone, ask the backend whether it may sign in and
    /// remember the returned student on this device.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::Phone` for malformed input, `LoginError::NotEligible`
    /// when the backend refuses the number, and API/storage failures.
    pub async fn check_phone(&self, raw: &str) -> Result<Student, LoginError> {
        let phone = normalize_phone(raw)?;
        let student = self
            .api
            .check_phone(&phone)
            .await?
            .ok_or(LoginError::NotEligible)?;
        self.store.cache_student(&student).await?;
        info!(student = %student.id, "student signed in");
        Ok(student)
    }

    /// # Errors
    ///
    /// Returns `LoginError::Storage` if the local store cannot be read.
    pub async fn cached_student(&self) -> Result<Option<Student>, LoginError> {
        Ok(self.store.cached_student().await?)
    }

    /// # Errors
    ///
    /// Returns `LoginError::Storage` if the local store cannot be written.
    pub async fn logout(&self) -> Result<(), LoginError> {
        Ok(self.store.clear_student().await?)
    }
}
