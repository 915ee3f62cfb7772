mod plan;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::{PlanError, QuizError};
pub use plan::{
    IdentitySampler, PlanMode, QuizPlan, QuizPlanBuilder, RandomSampler, Sampler, SeededSampler,
};
pub use progress::QuizProgress;
pub use service::{AnswerOutcome, NextOutcome, QuizSession};
pub use view::{AnswerReview, AnswerReviewService, ReviewItem};
pub use workflow::{FinishOutcome, QuizLoopService};
