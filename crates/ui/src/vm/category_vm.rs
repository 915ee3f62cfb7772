use quiz_core::model::{Category, CategoryFilter, CategorySummary};

/// One bank card on the category picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCardVm {
    pub category: Category,
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub remaining: u32,
    pub has_started: bool,
}

impl CategoryCardVm {
    #[must_use]
    pub fn from_summary(summary: &CategorySummary) -> Self {
        Self {
            category: summary.category.clone(),
            total: summary.total_questions,
            correct: summary.correct,
            incorrect: summary.incorrect,
            remaining: summary.remaining(),
            has_started: summary.has_started(),
        }
    }

    #[must_use]
    pub fn start_label(&self) -> &'static str {
        if self.has_started {
            "اكمل الاختبار"
        } else {
            "ابدأ الاختبار"
        }
    }

    /// Requested-count input default: the whole bank.
    #[must_use]
    pub fn default_requested(&self) -> usize {
        usize::try_from(self.total).unwrap_or(usize::MAX).max(1)
    }
}

#[must_use]
pub fn filter_label(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "الكل",
        CategoryFilter::Verbal => "لفظي",
        CategoryFilter::Quantitative => "كمي",
    }
}

#[must_use]
pub fn map_category_cards(
    summaries: &[CategorySummary],
    filter: CategoryFilter,
) -> Vec<CategoryCardVm> {
    filter
        .filter_summaries(summaries)
        .into_iter()
        .map(CategoryCardVm::from_summary)
        .collect()
}

/// Parse the requested-count input; blank, zero or garbage falls back to `default`.
#[must_use]
pub fn parse_requested_count(raw: &str, default: usize) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => count,
        _ => default,
    }
}
