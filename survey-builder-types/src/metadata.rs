use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{IdGenerator, ItemId};

/// A single option, row or column of a choice or grid question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ItemId,
    pub text: String,
}

impl Choice {
    /// Create a new choice.
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// An ordered list of choices.
///
/// Insertion order is preserved so the list renders stably and round-trips
/// to the persistence layer unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceList {
    items: Vec<Choice>,
}

impl ChoiceList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a list from texts, minting an id for each entry.
    pub fn from_texts<I, S>(texts: I, ids: &IdGenerator) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .map(|text| Choice::new(ids.next_id(), text))
            .collect()
    }

    /// The choices as a slice.
    pub fn as_slice(&self) -> &[Choice] {
        &self.items
    }

    /// Iterate over the choices in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Choice> {
        self.items.iter()
    }

    /// Iterate over the choice texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.text.as_str())
    }

    /// Number of choices.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no choices.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a choice by id.
    pub fn get(&self, id: ItemId) -> Option<&Choice> {
        self.items.iter().find(|c| c.id == id)
    }

    /// Find a choice by id for modification.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Choice> {
        self.items.iter_mut().find(|c| c.id == id)
    }

    /// Position of the choice with the given id.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|c| c.id == id)
    }

    /// Append a choice.
    pub fn push(&mut self, choice: Choice) {
        self.items.push(choice);
    }

    /// Insert a choice at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, choice: Choice) {
        let index = index.min(self.items.len());
        self.items.insert(index, choice);
    }

    /// Remove the choice with the given id.
    pub fn remove(&mut self, id: ItemId) -> Option<Choice> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Move the entry at `from` so it ends up at `to`.
    ///
    /// Out-of-range indices leave the list untouched.
    pub fn relocate(&mut self, from: usize, to: usize) {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return;
        }
        let choice = self.items.remove(from);
        self.items.insert(to, choice);
    }

    /// Replace every id with a fresh one from `ids`, keeping the texts.
    pub fn reminted(&self, ids: &IdGenerator) -> Self {
        self.items
            .iter()
            .map(|c| Choice::new(ids.next_id(), c.text.clone()))
            .collect()
    }
}

impl FromIterator<Choice> for ChoiceList {
    fn from_iter<T: IntoIterator<Item = Choice>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChoiceList {
    type Item = &'a Choice;
    type IntoIter = std::slice::Iter<'a, Choice>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Which choice list of a question an option operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionList {
    /// The options of a multiple choice, checkboxes or dropdown question.
    Options,
    /// The rows of a grid question.
    Rows,
    /// The columns of a grid question.
    Columns,
}

impl OptionList {
    /// The metadata key of this list, e.g. `"options"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::Rows => "rows",
            Self::Columns => "columns",
        }
    }

    /// The label the editor uses for new entries, e.g. `"Option"`.
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Options => "Option",
            Self::Rows => "Row",
            Self::Columns => "Column",
        }
    }
}

impl fmt::Display for OptionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of short answer and paragraph questions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextMetadata {
    /// Placeholder shown in the empty answer field.
    pub placeholder: String,

    /// Opaque validation rule, passed through to the backend untouched.
    pub validation: Option<serde_json::Value>,
}

/// Metadata of multiple choice, checkboxes and dropdown questions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceMetadata {
    pub options: ChoiceList,

    /// Present options in random order to each respondent.
    pub shuffle_options: bool,

    /// Offer a free-text "Other" entry after the options.
    pub other_option: bool,
}

/// Metadata of linear scale questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleMetadata {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub min_label: String,
    pub max_label: String,
}

impl Default for ScaleMetadata {
    fn default() -> Self {
        Self {
            min: 1,
            max: 5,
            step: 1,
            min_label: String::new(),
            max_label: String::new(),
        }
    }
}

impl ScaleMetadata {
    /// The selectable points of the scale, from `min` to `max` in `step`s.
    ///
    /// A non-positive step or an inverted range yields no points.
    pub fn points(&self) -> Vec<i64> {
        if self.step <= 0 || self.min > self.max {
            return Vec::new();
        }
        let mut points = Vec::new();
        let mut value = self.min;
        while value <= self.max {
            points.push(value);
            value += self.step;
        }
        points
    }
}

/// Metadata of multiple choice grid and checkbox grid questions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridMetadata {
    pub rows: ChoiceList,
    pub columns: ChoiceList,

    /// Require an answer in every row.
    pub require_one_per_row: bool,

    /// Present rows in random order to each respondent.
    pub shuffle_rows: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_list_keeps_insertion_order() {
        let ids = IdGenerator::new();
        let mut list = ChoiceList::from_texts(["Red", "Green"], &ids);
        list.insert(1, Choice::new(ids.next_id(), "Blue"));
        assert_eq!(list.texts().collect::<Vec<_>>(), ["Red", "Blue", "Green"]);
    }

    #[test]
    fn relocate_ignores_out_of_range() {
        let ids = IdGenerator::new();
        let mut list = ChoiceList::from_texts(["a", "b", "c"], &ids);
        list.relocate(0, 7);
        assert_eq!(list.texts().collect::<Vec<_>>(), ["a", "b", "c"]);
        list.relocate(0, 2);
        assert_eq!(list.texts().collect::<Vec<_>>(), ["b", "c", "a"]);
    }

    #[test]
    fn reminted_lists_get_fresh_ids() {
        let ids = IdGenerator::new();
        let list = ChoiceList::from_texts(["a", "b"], &ids);
        let copy = list.reminted(&ids);
        assert_eq!(copy.texts().collect::<Vec<_>>(), ["a", "b"]);
        for choice in &copy {
            assert!(list.get(choice.id).is_none());
        }
    }

    #[test]
    fn scale_points() {
        let scale = ScaleMetadata {
            min: 0,
            max: 10,
            step: 5,
            ..Default::default()
        };
        assert_eq!(scale.points(), [0, 5, 10]);

        let broken = ScaleMetadata {
            step: 0,
            ..Default::default()
        };
        assert!(broken.points().is_empty());
    }

    #[test]
    fn metadata_uses_camel_case_keys() {
        let metadata = GridMetadata {
            require_one_per_row: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["requireOnePerRow"], true);
        assert_eq!(json["shuffleRows"], false);
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let scale: ScaleMetadata =
            serde_json::from_value(serde_json::json!({ "max": 7 })).unwrap();
        assert_eq!((scale.min, scale.max, scale.step), (1, 7, 1));
    }
}
