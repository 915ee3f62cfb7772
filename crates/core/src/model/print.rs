use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::model::{Category, Question};

/// A question from the full catalog, tagged with its bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuestion {
    pub category: String,
    #[serde(flatten)]
    pub question: Question,
}

/// How many questions each bank contributes to the printable sheet, in the
/// backend's key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintDistribution(Vec<(String, usize)>);

impl PrintDistribution {
    #[must_use]
    pub fn new(entries: Vec<(String, usize)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(category, count)| (category.as_str(), *count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(u64),
    Text(String),
}

struct DistributionVisitor;

impl<'de> Visitor<'de> for DistributionVisitor {
    type Value = PrintDistribution;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of category to question count")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some((category, raw)) = map.next_entry::<String, RawCount>()? {
            let count = match raw {
                RawCount::Int(value) => usize::try_from(value).ok(),
                RawCount::Text(value) => value.trim().parse().ok(),
            };
            if let Some(count) = count {
                entries.push((category, count));
            }
        }
        Ok(PrintDistribution(entries))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(PrintDistribution::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(PrintDistribution::default())
    }
}

impl<'de> Deserialize<'de> for PrintDistribution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DistributionVisitor)
    }
}

/// One question on the printable sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintItem {
    pub category: Category,
    pub question: Question,
    pub correct_index: usize,
}

/// Take the first `count` valid questions of each bank, in catalog order,
/// banks in distribution order. Questions without exactly one correct answer
/// are skipped and do not use up a slot.
#[must_use]
pub fn select_print_items(
    distribution: &PrintDistribution,
    catalog: &[CatalogQuestion],
) -> Vec<PrintItem> {
    let mut items = Vec::new();
    for (name, count) in distribution.iter() {
        let Ok(category) = Category::new(name) else {
            continue;
        };
        items.extend(
            catalog
                .iter()
                .filter(|entry| entry.category == name)
                .filter_map(|entry| {
                    let correct_index = entry.question.correct_index().ok()?;
                    Some(PrintItem {
                        category: category.clone(),
                        question: entry.question.clone(),
                        correct_index,
                    })
                })
                .take(count),
        );
    }
    items
}
