use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{QuestionKind, QuestionTypeId, SurveyError};

/// The names of the question types the editor knows how to configure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionTypeName {
    ShortAnswer,
    Paragraph,
    MultipleChoice,
    Checkboxes,
    Dropdown,
    LinearScale,
    MultipleChoiceGrid,
    CheckboxGrid,
    Date,
    Time,
}

impl QuestionTypeName {
    /// All known type names, in the order the lookup service lists them.
    pub const ALL: [Self; 10] = [
        Self::ShortAnswer,
        Self::Paragraph,
        Self::MultipleChoice,
        Self::Checkboxes,
        Self::Dropdown,
        Self::LinearScale,
        Self::MultipleChoiceGrid,
        Self::CheckboxGrid,
        Self::Date,
        Self::Time,
    ];

    /// The wire name, e.g. `"multiple_choice"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShortAnswer => "short_answer",
            Self::Paragraph => "paragraph",
            Self::MultipleChoice => "multiple_choice",
            Self::Checkboxes => "checkboxes",
            Self::Dropdown => "dropdown",
            Self::LinearScale => "linear_scale",
            Self::MultipleChoiceGrid => "multiple_choice_grid",
            Self::CheckboxGrid => "checkbox_grid",
            Self::Date => "date",
            Self::Time => "time",
        }
    }

    /// The metadata shape used by this type.
    pub const fn family(self) -> MetadataFamily {
        match self {
            Self::ShortAnswer | Self::Paragraph => MetadataFamily::Text,
            Self::MultipleChoice | Self::Checkboxes | Self::Dropdown => MetadataFamily::Choice,
            Self::LinearScale => MetadataFamily::Scale,
            Self::MultipleChoiceGrid | Self::CheckboxGrid => MetadataFamily::Grid,
            Self::Date | Self::Time => MetadataFamily::Empty,
        }
    }
}

impl fmt::Display for QuestionTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionTypeName {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SurveyError::UnknownQuestionType(s.to_string()))
    }
}

/// Groups of question types that share a metadata shape.
///
/// Changing a question's type within a family keeps its metadata; changing
/// it across families resets the metadata to the new type's defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataFamily {
    /// No metadata at all (date, time, or no type selected).
    Empty,
    /// Placeholder and validation (short answer, paragraph).
    Text,
    /// A list of options (multiple choice, checkboxes, dropdown).
    Choice,
    /// Numeric bounds and labels (linear scale).
    Scale,
    /// Rows and columns (multiple choice grid, checkbox grid).
    Grid,
}

/// A question type as supplied by the question-types lookup service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionType {
    pub id: QuestionTypeId,
    pub name: String,
}

impl QuestionType {
    /// Create a new question type entry.
    pub fn new(id: QuestionTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The known type name, if the service returned one this crate understands.
    pub fn known_name(&self) -> Option<QuestionTypeName> {
        self.name.parse().ok()
    }
}

/// Maps question type ids to names and supplies default metadata.
///
/// The registry is filled once from the lookup service and never changes
/// during an editing session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionTypeRegistry {
    types: Vec<QuestionType>,
}

impl QuestionTypeRegistry {
    /// Create a registry from the types returned by the lookup service.
    pub fn new(types: Vec<QuestionType>) -> Self {
        Self { types }
    }

    /// The ten known types with ids 1 to 10, for offline use.
    pub fn standard() -> Self {
        let types = QuestionTypeName::ALL
            .into_iter()
            .zip(1u32..)
            .map(|(name, id)| QuestionType::new(QuestionTypeId::new(id), name.as_str()))
            .collect();
        Self { types }
    }

    /// All registered types.
    pub fn types(&self) -> &[QuestionType] {
        &self.types
    }

    /// Look up the type name for an id.
    pub fn name_of(&self, id: QuestionTypeId) -> Option<&str> {
        self.types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    /// Look up the known type name for an id.
    pub fn known_name_of(&self, id: QuestionTypeId) -> Option<QuestionTypeName> {
        self.name_of(id).and_then(|name| name.parse().ok())
    }

    /// Look up the id registered for a type name.
    pub fn id_of(&self, name: QuestionTypeName) -> Option<QuestionTypeId> {
        self.types
            .iter()
            .find(|t| t.name == name.as_str())
            .map(|t| t.id)
    }

    /// Default metadata for the type registered under `id`.
    ///
    /// Unset and unknown ids yield [`QuestionKind::Unset`].
    pub fn default_for_id(&self, id: QuestionTypeId) -> QuestionKind {
        match self.known_name_of(id) {
            Some(name) => QuestionKind::default_for(name),
            None => QuestionKind::Unset,
        }
    }

    /// Check whether the registry has no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }
}

/// Zero-value metadata for a type name.
///
/// Unknown names degrade to [`QuestionKind::Unset`] so the editor can show a
/// "select a type" placeholder instead of failing.
pub fn default_metadata(type_name: &str) -> QuestionKind {
    match type_name.parse::<QuestionTypeName>() {
        Ok(name) => QuestionKind::default_for(name),
        Err(_) => {
            log::trace!("no default metadata for question type {type_name:?}");
            QuestionKind::Unset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChoiceMetadata, ScaleMetadata, TextMetadata};

    #[test]
    fn names_round_trip_through_strings() {
        for name in QuestionTypeName::ALL {
            assert_eq!(name.as_str().parse::<QuestionTypeName>().ok(), Some(name));
        }
        assert!("essay".parse::<QuestionTypeName>().is_err());
    }

    #[test]
    fn standard_registry_maps_both_ways() {
        let registry = QuestionTypeRegistry::standard();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.name_of(QuestionTypeId::new(3)), Some("multiple_choice"));
        assert_eq!(
            registry.id_of(QuestionTypeName::Time),
            Some(QuestionTypeId::new(10))
        );
        assert_eq!(registry.name_of(QuestionTypeId::UNSET), None);
    }

    #[test]
    fn default_metadata_per_type() {
        assert_eq!(
            default_metadata("paragraph"),
            QuestionKind::Paragraph(TextMetadata::default())
        );
        assert_eq!(
            default_metadata("dropdown"),
            QuestionKind::Dropdown(ChoiceMetadata::default())
        );

        let QuestionKind::LinearScale(scale) = default_metadata("linear_scale") else {
            panic!("Expected LinearScale");
        };
        assert_eq!(scale, ScaleMetadata::default());
        assert_eq!((scale.min, scale.max, scale.step), (1, 5, 1));

        assert_eq!(default_metadata("date"), QuestionKind::Date);
    }

    #[test]
    fn unknown_type_degrades_to_unset() {
        assert_eq!(default_metadata(""), QuestionKind::Unset);
        assert_eq!(default_metadata("ranking"), QuestionKind::Unset);

        let registry = QuestionTypeRegistry::standard();
        assert_eq!(registry.default_for_id(QuestionTypeId::new(99)), QuestionKind::Unset);
        assert_eq!(registry.default_for_id(QuestionTypeId::UNSET), QuestionKind::Unset);
    }

    #[test]
    fn service_supplied_ids_are_respected() {
        let registry = QuestionTypeRegistry::new(vec![
            QuestionType::new(QuestionTypeId::new(20), "checkboxes"),
            QuestionType::new(QuestionTypeId::new(21), "legacy_matrix"),
        ]);
        assert_eq!(
            registry.known_name_of(QuestionTypeId::new(20)),
            Some(QuestionTypeName::Checkboxes)
        );
        assert_eq!(registry.name_of(QuestionTypeId::new(21)), Some("legacy_matrix"));
        assert_eq!(registry.known_name_of(QuestionTypeId::new(21)), None);
    }

    #[test]
    fn families() {
        assert_eq!(QuestionTypeName::Checkboxes.family(), MetadataFamily::Choice);
        assert_eq!(QuestionTypeName::CheckboxGrid.family(), MetadataFamily::Grid);
        assert_eq!(QuestionTypeName::Time.family(), MetadataFamily::Empty);
    }
}
