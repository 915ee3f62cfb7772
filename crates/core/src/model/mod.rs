mod admin;
mod category;
mod ids;
mod print;
mod progress;
mod question;
mod score;
mod session;
mod student;

pub use ids::{ParseIdError, QuestionId, ReportId, StudentId, VipStudentId};

pub use admin::{NewQuestionReport, NewVipStudent, QuestionReport, VipStudent, DEFAULT_GENDER};
pub use category::{Category, CategoryError, CategoryFilter, CategorySummary, VERBAL_CATEGORIES};
pub use print::{CatalogQuestion, PrintDistribution, PrintItem, select_print_items};
pub use progress::{AnswerError, StudentProgress, UserAnswers};
pub use question::{Answer, Question, QuestionBank, QuestionError, RejectedQuestion};
pub use score::QuizScore;
pub use session::{FinalizedQuestions, SessionRecord};
pub use student::{Student, StudentError, normalize_phone};
