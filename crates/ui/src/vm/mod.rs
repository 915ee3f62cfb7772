mod category_vm;
mod html;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use category_vm::{CategoryCardVm, filter_label, map_category_cards, parse_requested_count};
pub use html::{render_safe, rewrite_media_paths};
pub use quiz_vm::{AnswerButtonVm, AnswerState, QuestionVm, ReviewCellVm, map_review_cells};
pub use result_vm::ResultVm;
pub use time_fmt::format_elapsed;
