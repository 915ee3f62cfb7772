#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use quiz_core::model::{
    Answer, CatalogQuestion, Category, CategorySummary, NewQuestionReport, NewVipStudent,
    PrintDistribution, Question, QuestionId, QuestionReport, ReportId, Student, StudentId,
    StudentProgress, UserAnswers, VipStudent, VipStudentId,
};
use services::api::{AdminApi, ProgressUpdate, QuizApi, ResultMail, ResultSubmission};
use services::{ApiConfig, ApiError, AppServices};
use storage::repository::Storage;

/// In-memory backend recording every write.
#[derive(Default)]
pub struct FakeBackend {
    pub banks: Mutex<HashMap<Category, Vec<Question>>>,
    pub progress: Mutex<HashMap<(StudentId, Category), StudentProgress>>,
    pub saved_progress: Mutex<Vec<ProgressUpdate>>,
    pub reports: Mutex<Vec<NewQuestionReport>>,
    pub results: Mutex<Vec<ResultSubmission>>,
    pub mails: Mutex<Vec<ResultMail>>,
    pub eligible: Mutex<Vec<Student>>,
    pub vip: Mutex<Vec<VipStudent>>,
    pub distribution: Mutex<PrintDistribution>,
    pub fail_results: Mutex<u32>,
    pub fail_progress: Mutex<bool>,
    pub fail_mail: Mutex<bool>,
}

impl FakeBackend {
    pub fn with_bank(category: &Category, questions: Vec<Question>) -> Arc<Self> {
        let backend = Self::default();
        backend
            .banks
            .lock()
            .unwrap()
            .insert(category.clone(), questions);
        Arc::new(backend)
    }

    pub fn set_answers(&self, student: StudentId, category: &Category, answers: UserAnswers) {
        self.progress.lock().unwrap().insert(
            (student, category.clone()),
            StudentProgress {
                user_answers: answers,
                total_correct: 0,
                total_incorrect: 0,
            },
        );
    }

    pub fn result_count(&self) -> usize {
        self.results.lock().unwrap().len()
    }
}

fn unavailable() -> ApiError {
    ApiError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE)
}

#[async_trait]
impl QuizApi for FakeBackend {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let mut names: Vec<Category> = self.banks.lock().unwrap().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn categories_summary(
        &self,
        student: StudentId,
    ) -> Result<Vec<CategorySummary>, ApiError> {
        let banks = self.banks.lock().unwrap();
        let progress = self.progress.lock().unwrap();
        Ok(progress
            .iter()
            .filter(|((id, _), _)| *id == student)
            .map(|((_, category), record)| CategorySummary {
                category: category.clone(),
                total_questions: banks
                    .get(category)
                    .map_or(0, |qs| u32::try_from(qs.len()).unwrap()),
                answered: u32::try_from(record.user_answers.len()).unwrap(),
                correct: record.total_correct,
                incorrect: record.total_incorrect,
            })
            .collect())
    }

    async fn questions_by_category(&self, category: &Category) -> Result<Vec<Question>, ApiError> {
        Ok(self
            .banks
            .lock()
            .unwrap()
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn progress(
        &self,
        student: StudentId,
        category: &Category,
    ) -> Result<Option<StudentProgress>, ApiError> {
        Ok(self
            .progress
            .lock()
            .unwrap()
            .get(&(student, category.clone()))
            .cloned())
    }

    async fn save_progress(&self, update: &ProgressUpdate) -> Result<(), ApiError> {
        if *self.fail_progress.lock().unwrap() {
            return Err(unavailable());
        }
        self.saved_progress.lock().unwrap().push(update.clone());
        self.set_answers(
            update.student_id,
            &update.category,
            update.user_answers.clone(),
        );
        Ok(())
    }

    async fn report_question(&self, report: &NewQuestionReport) -> Result<(), ApiError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn submit_result(&self, result: &ResultSubmission) -> Result<(), ApiError> {
        let mut failures = self.fail_results.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(unavailable());
        }
        self.results.lock().unwrap().push(result.clone());
        Ok(())
    }

    async fn send_result_mail(&self, mail: &ResultMail) -> Result<(), ApiError> {
        if *self.fail_mail.lock().unwrap() {
            return Err(unavailable());
        }
        self.mails.lock().unwrap().push(mail.clone());
        Ok(())
    }

    async fn check_phone(&self, phone: &str) -> Result<Option<Student>, ApiError> {
        Ok(self
            .eligible
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.phone == phone)
            .cloned())
    }

    async fn all_questions(&self) -> Result<Vec<CatalogQuestion>, ApiError> {
        let banks = self.banks.lock().unwrap();
        let mut names: Vec<&Category> = banks.keys().collect();
        names.sort();
        Ok(names
            .into_iter()
            .flat_map(|category| {
                banks[category].iter().map(|question| CatalogQuestion {
                    category: category.as_str().to_string(),
                    question: question.clone(),
                })
            })
            .collect())
    }

    async fn print_distribution(&self) -> Result<PrintDistribution, ApiError> {
        Ok(self.distribution.lock().unwrap().clone())
    }
}

#[async_trait]
impl AdminApi for FakeBackend {
    async fn admin_login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        if username == "admin" && password == "secret" {
            Ok(())
        } else {
            Err(ApiError::HttpStatus(StatusCode::UNAUTHORIZED))
        }
    }

    async fn vip_students(&self) -> Result<Vec<VipStudent>, ApiError> {
        Ok(self.vip.lock().unwrap().clone())
    }

    async fn add_vip_student(&self, student: &NewVipStudent) -> Result<(), ApiError> {
        let mut vip = self.vip.lock().unwrap();
        let id = VipStudentId::new(u64::try_from(vip.len()).unwrap() + 1);
        vip.push(VipStudent {
            id,
            name: student.name.clone(),
            phone: student.phone.clone(),
            gender: Some(student.gender.clone()),
            created_at: None,
        });
        Ok(())
    }

    async fn delete_vip_student(&self, id: VipStudentId) -> Result<(), ApiError> {
        let mut vip = self.vip.lock().unwrap();
        let before = vip.len();
        vip.retain(|s| s.id != id);
        if vip.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    async fn bulk_upload_vip_students(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<String>, ApiError> {
        Ok(Some(format!("{file_name}: {} bytes", bytes.len())))
    }

    async fn reports(&self) -> Result<Vec<QuestionReport>, ApiError> {
        Ok(Vec::new())
    }

    async fn delete_report(&self, _id: ReportId) -> Result<(), ApiError> {
        Ok(())
    }
}

pub fn category(name: &str) -> Category {
    Category::new(name).unwrap()
}

/// Questions `1..=n`; answer 0 is always the correct one.
pub fn questions(n: u64) -> Vec<Question> {
    (1..=n)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("<p>Question {id}</p>"),
                vec![
                    Answer::new("<p>right</p>", true),
                    Answer::new("<p>wrong</p>", false),
                ],
            )
        })
        .collect()
}

pub fn student() -> Student {
    Student {
        id: StudentId::new(42),
        name: "Sara".into(),
        phone: "0555123456".into(),
        email: Some("sara@example.test".into()),
    }
}

pub fn services(backend: &Arc<FakeBackend>) -> AppServices {
    let config = ApiConfig::production().unwrap();
    let quiz_api: Arc<dyn QuizApi> = backend.clone();
    let admin_api: Arc<dyn AdminApi> = backend.clone();
    AppServices::from_parts(config, Storage::in_memory(), quiz_api, admin_api)
}
