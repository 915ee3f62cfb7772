use std::sync::Arc;

use quiz_core::model::{NewVipStudent, QuestionReport, ReportId, VipStudent, VipStudentId};
use storage::LocalStore;
use tracing::info;

use crate::api::AdminApi;
use crate::error::AdminError;

/// Admin operations: the eligibility list and question reports.
///
/// Everything except `login` requires the device-local admin flag.
#[derive(Clone)]
pub struct AdminService {
    api: Arc<dyn AdminApi>,
    store: LocalStore,
}

impl AdminService {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>, store: LocalStore) -> Self {
        Self { api, store }
    }

    /// # Errors
    ///
    /// Returns `AdminError::MissingCredentials` for blank input and
    /// `AdminError::Api` when the backend rejects the credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AdminError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AdminError::MissingCredentials);
        }
        self.api.admin_login(username, password).await?;
        self.store.set_admin_logged_in(true).await?;
        info!("admin logged in");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AdminError::Storage` if the flag cannot be cleared.
    pub async fn logout(&self) -> Result<(), AdminError> {
        Ok(self.store.set_admin_logged_in(false).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Storage` if the flag cannot be read.
    pub async fn is_logged_in(&self) -> Result<bool, AdminError> {
        Ok(self.store.is_admin_logged_in().await?)
    }

    async fn require_login(&self) -> Result<(), AdminError> {
        if self.is_logged_in().await? {
            Ok(())
        } else {
            Err(AdminError::NotLoggedIn)
        }
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotLoggedIn` or `AdminError::Api`.
    pub async fn list_vip_students(&self) -> Result<Vec<VipStudent>, AdminError> {
        self.require_login().await?;
        Ok(self.api.vip_students().await?)
    }

    /// Add one phone number to the eligibility list; a blank gender is
    /// stored as unspecified.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::MissingField` for a blank name or phone,
    /// `AdminError::NotLoggedIn` or `AdminError::Api`.
    pub async fn add_vip_student(
        &self,
        name: &str,
        phone: &str,
        gender: Option<String>,
    ) -> Result<(), AdminError> {
        self.require_login().await?;
        let (name, phone) = (name.trim(), phone.trim());
        if name.is_empty() {
            return Err(AdminError::MissingField("name"));
        }
        if phone.is_empty() {
            return Err(AdminError::MissingField("phone"));
        }
        self.api
            .add_vip_student(&NewVipStudent::new(name, phone, gender))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotLoggedIn` or `AdminError::Api`.
    pub async fn delete_vip_student(&self, id: VipStudentId) -> Result<(), AdminError> {
        self.require_login().await?;
        Ok(self.api.delete_vip_student(id).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotLoggedIn` or `AdminError::Api`.
    pub async fn bulk_upload_vip_students(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, AdminError> {
        self.require_login().await?;
        Ok(self.api.bulk_upload_vip_students(file_name, bytes).await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotLoggedIn` or `AdminError::Api`.
    pub async fn list_reports(&self) -> Result<Vec<QuestionReport>, AdminError> {
        self.require_login().await?;
        Ok(self.api.reports().await?)
    }

    /// # Errors
    ///
    /// Returns `AdminError::NotLoggedIn` or `AdminError::Api`.
    pub async fn delete_report(&self, id: ReportId) -> Result<(), AdminError> {
        self.require_login().await?;
        Ok(self.api.delete_report(id).await?)
    }
}
