use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Locally persisted shape of a chosen subset and the navigation position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub ids: Vec<QuestionId>,
    #[serde(default)]
    pub current_question_id: Option<QuestionId>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(ids: Vec<QuestionId>, current_question_id: Option<QuestionId>) -> Self {
        Self {
            ids,
            current_question_id,
        }
    }

    /// A record only counts as a resumable subset when it names at least one id.
    #[must_use]
    pub fn has_subset(&self) -> bool {
        !self.ids.is_empty()
    }

    /// Position of `current_question_id` inside the subset.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current_question_id?;
        self.ids.iter().position(|id| *id == current)
    }
}

/// Questions the student has committed to in the current subset pass.
///
/// Insertion order is kept so the persisted list stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalizedQuestions(Vec<QuestionId>);

impl FinalizedQuestions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains(&id)
    }

    /// Returns true when the id was not finalized before.
    pub fn insert(&mut self, id: QuestionId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<QuestionId> for FinalizedQuestions {
    fn from_iter<I: IntoIterator<Item = QuestionId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl Extend<QuestionId> for FinalizedQuestions {
    fn extend<I: IntoIterator<Item = QuestionId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_fields() {
        let record = SessionRecord::new(vec![QuestionId::new(3), QuestionId::new(1)], Some(QuestionId::new(1)));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"ids":[3,1],"currentQuestionId":1}"#);
        assert_eq!(record.current_index(), Some(1));
    }

    #[test]
    fn current_index_ignores_foreign_ids() {
        let record = SessionRecord::new(vec![QuestionId::new(3)], Some(QuestionId::new(8)));
        assert_eq!(record.current_index(), None);
        assert!(!SessionRecord::default().has_subset());
    }

    #[test]
    fn finalized_is_a_set_with_stable_order() {
        let mut set: FinalizedQuestions = [QuestionId::new(2), QuestionId::new(1), QuestionId::new(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(!set.insert(QuestionId::new(1)));
        assert!(set.insert(QuestionId::new(5)));
        let ids: Vec<_> = set.iter().map(|id| id.value()).collect();
        assert_eq!(ids, vec![2, 1, 5]);
    }
}
