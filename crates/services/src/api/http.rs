use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use quiz_core::model::{
    CatalogQuestion, Category, CategorySummary, NewQuestionReport, PrintDistribution, NewVipStudent, Question, QuestionReport,
    ReportId, Student, StudentId, StudentProgress, VipStudent, VipStudentId,
};

use super::dto::{
    AdminLoginRequest, CatalogEnvelope, CategoryRequest, MessageResponse, PhoneCheckRequest,
    PhoneCheckResponse, ProgressUpdate, QuestionsEnvelope, ResultMail, ResultSubmission,
};
use super::{AdminApi, ApiConfig, QuizApi};
use crate::error::ApiError;

/// reqwest-backed client for both the student and admin endpoints.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    config: ApiConfig,
}

impl HttpQuizApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.config.endpoint(segments)?;
        let response = Self::send(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.config.endpoint(segments)?;
        Self::send(self.client.post(url).json(body)).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        let url = self.config.endpoint(segments)?;
        Self::send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let names: Vec<String> = self.get_json(&["question-categories"]).await?;
        Ok(names
            .into_iter()
            .filter_map(|name| Category::new(name).ok())
            .collect())
    }

    async fn categories_summary(
        &self,
        student: StudentId,
    ) -> Result<Vec<CategorySummary>, ApiError> {
        let student = student.to_string();
        self.get_json(&["categories-summary", &student]).await
    }

    async fn questions_by_category(&self, category: &Category) -> Result<Vec<Question>, ApiError> {
        let response = self
            .post(&["questions", "by-category"], &CategoryRequest { category })
            .await?;
        let envelope: QuestionsEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    async fn progress(
        &self,
        student: StudentId,
        category: &Category,
    ) -> Result<Option<StudentProgress>, ApiError> {
        let student = student.to_string();
        match self
            .get_json(&["student-progress", &student, category.as_str()])
            .await
        {
            Ok(progress) => Ok(Some(progress)),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn save_progress(&self, update: &ProgressUpdate) -> Result<(), ApiError> {
        self.post(&["student-progress"], update).await?;
        Ok(())
    }

    async fn report_question(&self, report: &NewQuestionReport) -> Result<(), ApiError> {
        self.post(&["report-question"], report).await?;
        Ok(())
    }

    async fn submit_result(&self, result: &ResultSubmission) -> Result<(), ApiError> {
        self.post(&["students"], result).await?;
        Ok(())
    }

    async fn send_result_mail(&self, mail: &ResultMail) -> Result<(), ApiError> {
        self.post(&["email", "sendMail"], mail).await?;
        Ok(())
    }

    async fn check_phone(&self, phone: &str) -> Result<Option<Student>, ApiError> {
        let response = self
            .post(&["vip-students", "check"], &PhoneCheckRequest { phone })
            .await?;
        let body: PhoneCheckResponse = response.json().await?;
        Ok(body.student.filter(|_| body.status))
    }

    async fn all_questions(&self) -> Result<Vec<CatalogQuestion>, ApiError> {
        let envelope: CatalogEnvelope = self.get_json(&["questions"]).await?;
        Ok(envelope.data)
    }

    async fn print_distribution(&self) -> Result<PrintDistribution, ApiError> {
        self.get_json(&["pdf-distribution"]).await
    }
}

#[async_trait]
impl AdminApi for HttpQuizApi {
    async fn admin_login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.post(&["admin-login"], &AdminLoginRequest { username, password })
            .await?;
        Ok(())
    }

    async fn vip_students(&self) -> Result<Vec<VipStudent>, ApiError> {
        self.get_json(&["vip-students"]).await
    }

    async fn add_vip_student(&self, student: &NewVipStudent) -> Result<(), ApiError> {
        self.post(&["vip-students"], student).await?;
        Ok(())
    }

    async fn delete_vip_student(&self, id: VipStudentId) -> Result<(), ApiError> {
        let id = id.to_string();
        self.delete(&["vip-students", &id]).await
    }

    async fn bulk_upload_vip_students(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, ApiError> {
        let url = self.config.endpoint(&["vip-students", "bulk-upload"])?;
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let response = Self::send(self.client.post(url).multipart(form)).await?;
        let body: MessageResponse = response.json().await.unwrap_or_default();
        Ok(body.message)
    }

    async fn reports(&self) -> Result<Vec<QuestionReport>, ApiError> {
        self.get_json(&["reports"]).await
    }

    async fn delete_report(&self, id: ReportId) -> Result<(), ApiError> {
        let id = id.to_string();
        self.delete(&["question-reports", &id]).await
    }
}
