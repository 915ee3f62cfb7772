use std::sync::Arc;

use quiz_core::model::{PrintItem, select_print_items};
use tracing::debug;

use crate::api::QuizApi;
use crate::error::ApiError;

/// Builds the printable question sheet from the full catalog.
#[derive(Clone)]
pub struct PrintSheetService {
    api: Arc<dyn QuizApi>,
}

impl PrintSheetService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self { api }
    }

    /// Fetch the catalog and the per-bank distribution, then pick the first
    /// questions of each bank.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if either request fails.
    pub async fn load(&self) -> Result<Vec<PrintItem>, ApiError> {
        let catalog = self.api.all_questions().await?;
        let distribution = self.api.print_distribution().await?;
        let items = select_print_items(&distribution, &catalog);
        debug!(catalog = catalog.len(), selected = items.len(), "print sheet ready");
        Ok(items)
    }
}
