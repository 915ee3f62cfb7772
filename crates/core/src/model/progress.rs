use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question {id} is already answered")]
    AlreadyAnswered { id: QuestionId },
}

/// Selected answer index per question.
///
/// Once a question has an entry it is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserAnswers(BTreeMap<QuestionId, usize>);

impl UserAnswers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<usize> {
        self.0.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.0.contains_key(&id)
    }

    /// Store the answer for a question that has none yet.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::AlreadyAnswered` if an answer is already stored;
    /// the stored answer is left untouched.
    pub fn record(&mut self, id: QuestionId, index: usize) -> Result<(), AnswerError> {
        if self.0.contains_key(&id) {
            return Err(AnswerError::AlreadyAnswered { id });
        }
        self.0.insert(id, index);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn answered_ids(&self) -> HashSet<QuestionId> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, usize)> + '_ {
        self.0.iter().map(|(id, index)| (*id, *index))
    }
}

impl FromIterator<(QuestionId, usize)> for UserAnswers {
    fn from_iter<I: IntoIterator<Item = (QuestionId, usize)>>(iter: I) -> Self {
        let mut answers = Self::new();
        for (id, index) in iter {
            // First write wins, same as `record`.
            answers.0.entry(id).or_insert(index);
        }
        answers
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Int(u64),
    Text(String),
    Null(()),
}

impl RawIndex {
    fn index(self) -> Option<usize> {
        match self {
            RawIndex::Int(value) => usize::try_from(value).ok(),
            RawIndex::Text(value) => value.trim().parse::<usize>().ok(),
            RawIndex::Null(()) => None,
        }
    }
}

/// Accepts an id-keyed object, `null`, or an empty array (the backend's
/// encoding of an empty object). Unparsable keys and null values are dropped.
struct UserAnswersVisitor;

impl<'de> Visitor<'de> for UserAnswersVisitor {
    type Value = UserAnswers;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of question id to answer index")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut answers = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, RawIndex>()? {
            let (Ok(id), Some(index)) = (key.parse::<QuestionId>(), value.index()) else {
                continue;
            };
            answers.entry(id).or_insert(index);
        }
        Ok(UserAnswers(answers))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(1, &"an empty array"));
        }
        Ok(UserAnswers::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(UserAnswers::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(UserAnswers::new())
    }
}

impl<'de> Deserialize<'de> for UserAnswers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UserAnswersVisitor)
    }
}

/// Backend progress record for one (student, category).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProgress {
    #[serde(default)]
    pub user_answers: UserAnswers,
    #[serde(default)]
    pub total_correct: u32,
    #[serde(default)]
    pub total_incorrect: u32,
}
