use dioxus::prelude::*;
use services::{LoginError, QuizError, ReportError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NoQuestions,
    NotEligible,
    InvalidPhone,
    EmptyReport,
    /// The page needs a signed-in student.
    SignedOut,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unknown => "حدث خطأ، حاول مرة أخرى.",
            Self::NoQuestions => "⚠️ لا توجد أسئلة لهذا البنك",
            Self::NotEligible => "❌ الرقم غير مسموح له بالدخول",
            Self::InvalidPhone => "رقم الجوال يبدأ بـ 05 ويتكون من 10 أرقام",
            Self::EmptyReport => "من فضلك اكتب تفاصيل البلاغ",
            Self::SignedOut => "من فضلك سجل الدخول أولاً",
        }
    }
}

impl From<QuizError> for ViewError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NoQuestions { .. } => Self::NoQuestions,
            _ => Self::Unknown,
        }
    }
}

impl From<LoginError> for ViewError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::NotEligible => Self::NotEligible,
            LoginError::Phone(_) => Self::InvalidPhone,
            _ => Self::Unknown,
        }
    }
}

impl From<ReportError> for ViewError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::EmptyMessage => Self::EmptyReport,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Category, StudentError};

    #[test]
    fn service_errors_map_to_user_messages() {
        let category = Category::new("math").unwrap();
        assert_eq!(
            ViewError::from(QuizError::NoQuestions { category }),
            ViewError::NoQuestions
        );
        assert_eq!(
            ViewError::from(LoginError::Phone(StudentError::EmptyPhone)),
            ViewError::InvalidPhone
        );
        assert_eq!(ViewError::from(LoginError::NotEligible), ViewError::NotEligible);
        assert_eq!(ViewError::from(ReportError::EmptyMessage), ViewError::EmptyReport);
    }
}
