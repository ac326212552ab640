use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{
    ChoiceList, ChoiceMetadata, GridMetadata, IdGenerator, ItemId, MetadataFamily, OptionList,
    QuestionTypeId, QuestionTypeName, QuestionTypeRegistry, ScaleMetadata, SurveyError,
    TextMetadata,
};

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Client-side identity, stable across edits.
    id: ItemId,

    /// The question type as known to the lookup service.
    type_id: QuestionTypeId,

    /// The prompt text shown to the respondent.
    text: String,

    /// Whether the respondent must answer.
    required: bool,

    /// The kind of question, carrying its type-specific metadata.
    kind: QuestionKind,
}

impl Question {
    /// Create a blank question: no text, no type, not required.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            type_id: QuestionTypeId::UNSET,
            text: String::new(),
            required: false,
            kind: QuestionKind::Unset,
        }
    }

    /// Get the question id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Get the question type id.
    pub fn type_id(&self) -> QuestionTypeId {
        self.type_id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if an answer is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Get a mutable reference to the question kind.
    pub fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    /// The known type name, derived from the kind.
    pub fn type_name(&self) -> Option<QuestionTypeName> {
        self.kind.type_name()
    }

    /// Replace the id.
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    /// Replace the prompt text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set whether an answer is required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the type id together with the matching kind.
    pub fn with_type(mut self, type_id: QuestionTypeId, kind: QuestionKind) -> Self {
        self.type_id = type_id;
        self.kind = kind;
        self
    }

    /// Replace the kind (and with it the metadata) wholesale.
    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = kind;
        self
    }

    /// A copy of this question with new ids throughout and `" (copy)"` appended to the text.
    pub fn duplicate(&self, ids: &IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            type_id: self.type_id,
            text: format!("{} (copy)", self.text),
            required: self.required,
            kind: self.kind.reminted(ids),
        }
    }

    /// All ids used by this question and its choices.
    pub fn item_ids(&self) -> Vec<ItemId> {
        let mut ids = vec![self.id];
        ids.extend(self.kind.choice_ids());
        ids
    }

    /// Convert to the wire format of the persistence API.
    pub fn to_record(&self) -> Result<QuestionRecord, SurveyError> {
        Ok(QuestionRecord {
            id: self.id,
            type_id: self.type_id,
            text: self.text.clone(),
            required: self.required,
            metadata: self.kind.to_metadata()?,
        })
    }

    /// Rebuild a question from the wire format, resolving the type through `registry`.
    pub fn from_record(record: QuestionRecord, registry: &QuestionTypeRegistry) -> Self {
        let name = registry.known_name_of(record.type_id);
        Self {
            id: record.id,
            type_id: record.type_id,
            text: record.text,
            required: record.required,
            kind: QuestionKind::from_metadata(name, &record.metadata),
        }
    }
}

/// The kind of question, determining which metadata it carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QuestionKind {
    /// No type selected yet.
    #[default]
    Unset,

    /// Single-line free text.
    ShortAnswer(TextMetadata),

    /// Multi-line free text.
    Paragraph(TextMetadata),

    /// Pick exactly one option.
    MultipleChoice(ChoiceMetadata),

    /// Pick any number of options.
    Checkboxes(ChoiceMetadata),

    /// Pick one option from a dropdown.
    Dropdown(ChoiceMetadata),

    /// Pick a point on a numeric scale.
    LinearScale(ScaleMetadata),

    /// Pick one column per row.
    MultipleChoiceGrid(GridMetadata),

    /// Pick any number of columns per row.
    CheckboxGrid(GridMetadata),

    /// A calendar date.
    Date,

    /// A time of day.
    Time,
}

impl QuestionKind {
    /// Zero-value metadata for a type.
    pub fn default_for(name: QuestionTypeName) -> Self {
        match name {
            QuestionTypeName::ShortAnswer => Self::ShortAnswer(TextMetadata::default()),
            QuestionTypeName::Paragraph => Self::Paragraph(TextMetadata::default()),
            QuestionTypeName::MultipleChoice => Self::MultipleChoice(ChoiceMetadata::default()),
            QuestionTypeName::Checkboxes => Self::Checkboxes(ChoiceMetadata::default()),
            QuestionTypeName::Dropdown => Self::Dropdown(ChoiceMetadata::default()),
            QuestionTypeName::LinearScale => Self::LinearScale(ScaleMetadata::default()),
            QuestionTypeName::MultipleChoiceGrid => {
                Self::MultipleChoiceGrid(GridMetadata::default())
            }
            QuestionTypeName::CheckboxGrid => Self::CheckboxGrid(GridMetadata::default()),
            QuestionTypeName::Date => Self::Date,
            QuestionTypeName::Time => Self::Time,
        }
    }

    /// The type name matching this kind, or `None` when unset.
    pub fn type_name(&self) -> Option<QuestionTypeName> {
        Some(match self {
            Self::Unset => return None,
            Self::ShortAnswer(_) => QuestionTypeName::ShortAnswer,
            Self::Paragraph(_) => QuestionTypeName::Paragraph,
            Self::MultipleChoice(_) => QuestionTypeName::MultipleChoice,
            Self::Checkboxes(_) => QuestionTypeName::Checkboxes,
            Self::Dropdown(_) => QuestionTypeName::Dropdown,
            Self::LinearScale(_) => QuestionTypeName::LinearScale,
            Self::MultipleChoiceGrid(_) => QuestionTypeName::MultipleChoiceGrid,
            Self::CheckboxGrid(_) => QuestionTypeName::CheckboxGrid,
            Self::Date => QuestionTypeName::Date,
            Self::Time => QuestionTypeName::Time,
        })
    }

    /// The metadata family of this kind.
    pub fn family(&self) -> MetadataFamily {
        self.type_name()
            .map_or(MetadataFamily::Empty, QuestionTypeName::family)
    }

    /// Check if no type has been selected.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Text metadata, for short answer and paragraph questions.
    pub fn text_metadata(&self) -> Option<&TextMetadata> {
        match self {
            Self::ShortAnswer(m) | Self::Paragraph(m) => Some(m),
            _ => None,
        }
    }

    /// Choice metadata, for multiple choice, checkboxes and dropdown questions.
    pub fn choices(&self) -> Option<&ChoiceMetadata> {
        match self {
            Self::MultipleChoice(m) | Self::Checkboxes(m) | Self::Dropdown(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable choice metadata.
    pub fn choices_mut(&mut self) -> Option<&mut ChoiceMetadata> {
        match self {
            Self::MultipleChoice(m) | Self::Checkboxes(m) | Self::Dropdown(m) => Some(m),
            _ => None,
        }
    }

    /// Scale metadata, for linear scale questions.
    pub fn scale(&self) -> Option<&ScaleMetadata> {
        match self {
            Self::LinearScale(m) => Some(m),
            _ => None,
        }
    }

    /// Grid metadata, for grid questions.
    pub fn grid(&self) -> Option<&GridMetadata> {
        match self {
            Self::MultipleChoiceGrid(m) | Self::CheckboxGrid(m) => Some(m),
            _ => None,
        }
    }

    /// Mutable grid metadata.
    pub fn grid_mut(&mut self) -> Option<&mut GridMetadata> {
        match self {
            Self::MultipleChoiceGrid(m) | Self::CheckboxGrid(m) => Some(m),
            _ => None,
        }
    }

    /// The choice list selected by `list`, if this kind carries it.
    pub fn choice_list(&self, list: OptionList) -> Option<&ChoiceList> {
        match list {
            OptionList::Options => self.choices().map(|m| &m.options),
            OptionList::Rows => self.grid().map(|m| &m.rows),
            OptionList::Columns => self.grid().map(|m| &m.columns),
        }
    }

    /// Mutable access to the choice list selected by `list`.
    pub fn choice_list_mut(&mut self, list: OptionList) -> Option<&mut ChoiceList> {
        match list {
            OptionList::Options => self.choices_mut().map(|m| &mut m.options),
            OptionList::Rows => self.grid_mut().map(|m| &mut m.rows),
            OptionList::Columns => self.grid_mut().map(|m| &mut m.columns),
        }
    }

    /// Convert to the kind for `name`.
    ///
    /// Metadata survives when the new type is in the same family; otherwise
    /// it is replaced by the new type's defaults, so no stale fields from a
    /// different shape are kept around.
    pub fn retyped(self, name: Option<QuestionTypeName>) -> Self {
        let Some(name) = name else {
            return Self::Unset;
        };
        if self.family() != name.family() {
            return Self::default_for(name);
        }
        match (name, self) {
            (QuestionTypeName::ShortAnswer, Self::ShortAnswer(m) | Self::Paragraph(m)) => {
                Self::ShortAnswer(m)
            }
            (QuestionTypeName::Paragraph, Self::ShortAnswer(m) | Self::Paragraph(m)) => {
                Self::Paragraph(m)
            }
            (QuestionTypeName::MultipleChoice, kind) => {
                kind.into_choices().map_or_else(|| Self::default_for(name), Self::MultipleChoice)
            }
            (QuestionTypeName::Checkboxes, kind) => {
                kind.into_choices().map_or_else(|| Self::default_for(name), Self::Checkboxes)
            }
            (QuestionTypeName::Dropdown, kind) => {
                kind.into_choices().map_or_else(|| Self::default_for(name), Self::Dropdown)
            }
            (QuestionTypeName::MultipleChoiceGrid, kind) => kind
                .into_grid()
                .map_or_else(|| Self::default_for(name), Self::MultipleChoiceGrid),
            (QuestionTypeName::CheckboxGrid, kind) => {
                kind.into_grid().map_or_else(|| Self::default_for(name), Self::CheckboxGrid)
            }
            (QuestionTypeName::LinearScale, Self::LinearScale(m)) => Self::LinearScale(m),
            (name, _) => Self::default_for(name),
        }
    }

    fn into_choices(self) -> Option<ChoiceMetadata> {
        match self {
            Self::MultipleChoice(m) | Self::Checkboxes(m) | Self::Dropdown(m) => Some(m),
            _ => None,
        }
    }

    fn into_grid(self) -> Option<GridMetadata> {
        match self {
            Self::MultipleChoiceGrid(m) | Self::CheckboxGrid(m) => Some(m),
            _ => None,
        }
    }

    /// A copy of this kind whose options, rows and columns have fresh ids.
    pub fn reminted(&self, ids: &IdGenerator) -> Self {
        let mut kind = self.clone();
        for list in [OptionList::Options, OptionList::Rows, OptionList::Columns] {
            if let Some(choices) = kind.choice_list_mut(list) {
                *choices = choices.reminted(ids);
            }
        }
        kind
    }

    /// Ids of every option, row and column.
    pub fn choice_ids(&self) -> Vec<ItemId> {
        [OptionList::Options, OptionList::Rows, OptionList::Columns]
            .into_iter()
            .filter_map(|list| self.choice_list(list))
            .flat_map(|choices| choices.iter().map(|c| c.id))
            .collect()
    }

    /// Encode the metadata as the JSON object the persistence API stores.
    ///
    /// Kinds without metadata encode as `{}`.
    pub fn to_metadata(&self) -> Result<serde_json::Value, SurveyError> {
        let value = match self {
            Self::Unset | Self::Date | Self::Time => {
                serde_json::Value::Object(serde_json::Map::new())
            }
            Self::ShortAnswer(m) | Self::Paragraph(m) => serde_json::to_value(m)?,
            Self::MultipleChoice(m) | Self::Checkboxes(m) | Self::Dropdown(m) => {
                serde_json::to_value(m)?
            }
            Self::LinearScale(m) => serde_json::to_value(m)?,
            Self::MultipleChoiceGrid(m) | Self::CheckboxGrid(m) => serde_json::to_value(m)?,
        };
        Ok(value)
    }

    /// Decode metadata received from the persistence API.
    ///
    /// Decoding never fails: missing fields take their defaults and a value
    /// that does not fit the shape at all is replaced by the type's defaults.
    pub fn from_metadata(name: Option<QuestionTypeName>, metadata: &serde_json::Value) -> Self {
        let Some(name) = name else {
            return Self::Unset;
        };
        match name {
            QuestionTypeName::ShortAnswer => Self::ShortAnswer(decode(name, metadata)),
            QuestionTypeName::Paragraph => Self::Paragraph(decode(name, metadata)),
            QuestionTypeName::MultipleChoice => Self::MultipleChoice(decode(name, metadata)),
            QuestionTypeName::Checkboxes => Self::Checkboxes(decode(name, metadata)),
            QuestionTypeName::Dropdown => Self::Dropdown(decode(name, metadata)),
            QuestionTypeName::LinearScale => Self::LinearScale(decode(name, metadata)),
            QuestionTypeName::MultipleChoiceGrid => {
                Self::MultipleChoiceGrid(decode(name, metadata))
            }
            QuestionTypeName::CheckboxGrid => Self::CheckboxGrid(decode(name, metadata)),
            QuestionTypeName::Date => Self::Date,
            QuestionTypeName::Time => Self::Time,
        }
    }
}

fn decode<T: DeserializeOwned + Default>(name: QuestionTypeName, metadata: &serde_json::Value) -> T {
    if metadata.is_null() {
        return T::default();
    }
    T::deserialize(metadata).unwrap_or_else(|err| {
        log::warn!("malformed {name} metadata, falling back to defaults: {err}");
        T::default()
    })
}

/// A question as exchanged with the persistence API.
///
/// `metadata` is an opaque JSON object whose shape depends on the type
/// behind `type_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: ItemId,

    #[serde(default)]
    pub type_id: QuestionTypeId,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn choice_kind(ids: &IdGenerator) -> QuestionKind {
        QuestionKind::MultipleChoice(ChoiceMetadata {
            options: ChoiceList::from_texts(["Yes", "No"], ids),
            shuffle_options: true,
            other_option: false,
        })
    }

    #[test]
    fn retype_within_family_keeps_metadata() {
        let ids = IdGenerator::new();
        let kind = choice_kind(&ids);
        let options = kind.choices().unwrap().options.clone();

        let retyped = kind.retyped(Some(QuestionTypeName::Dropdown));
        let QuestionKind::Dropdown(metadata) = &retyped else {
            panic!("Expected Dropdown, got {retyped:?}");
        };
        assert_eq!(metadata.options, options);
        assert!(metadata.shuffle_options);
    }

    #[test]
    fn retype_across_families_resets_metadata() {
        let ids = IdGenerator::new();
        let retyped = choice_kind(&ids).retyped(Some(QuestionTypeName::LinearScale));
        assert_eq!(retyped, QuestionKind::LinearScale(ScaleMetadata::default()));
        assert!(retyped.choice_list(OptionList::Options).is_none());
    }

    #[test]
    fn retype_to_nothing_is_unset() {
        let ids = IdGenerator::new();
        assert_eq!(choice_kind(&ids).retyped(None), QuestionKind::Unset);
    }

    #[test]
    fn text_kinds_swap_freely() {
        let kind = QuestionKind::ShortAnswer(TextMetadata {
            placeholder: "Your name".into(),
            validation: None,
        });
        let retyped = kind.retyped(Some(QuestionTypeName::Paragraph));
        assert_eq!(retyped.text_metadata().unwrap().placeholder, "Your name");
        assert_eq!(retyped.type_name(), Some(QuestionTypeName::Paragraph));
    }

    #[test]
    fn duplicate_remints_every_id() {
        let ids = IdGenerator::new();
        let question = Question::new(ids.next_id())
            .with_text("Favourite colour?")
            .with_kind(choice_kind(&ids));

        let copy = question.duplicate(&ids);
        assert_eq!(copy.text(), "Favourite colour? (copy)");
        for id in copy.item_ids() {
            assert!(!question.item_ids().contains(&id));
        }
        assert_eq!(
            copy.kind().choices().unwrap().options.texts().collect::<Vec<_>>(),
            ["Yes", "No"]
        );
    }

    #[test]
    fn records_carry_camel_case_metadata() {
        let ids = IdGenerator::new();
        let registry = QuestionTypeRegistry::standard();
        let question = Question::new(ids.next_id())
            .with_text("Pick one")
            .with_required(true)
            .with_type(
                registry.id_of(QuestionTypeName::MultipleChoice).unwrap(),
                choice_kind(&ids),
            );

        let record = question.to_record().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["typeId"], 3);
        assert_eq!(json["metadata"]["shuffleOptions"], true);
        assert_eq!(json["metadata"]["options"][0]["text"], "Yes");

        assert_eq!(Question::from_record(record, &registry), question);
    }

    #[test]
    fn empty_kinds_encode_as_empty_object() {
        assert_eq!(QuestionKind::Date.to_metadata().unwrap(), json!({}));
        assert_eq!(QuestionKind::Unset.to_metadata().unwrap(), json!({}));
    }

    #[test]
    fn malformed_metadata_degrades_to_defaults() {
        let kind = QuestionKind::from_metadata(
            Some(QuestionTypeName::Checkboxes),
            &json!({ "options": "not a list" }),
        );
        assert_eq!(kind, QuestionKind::Checkboxes(ChoiceMetadata::default()));

        let kind = QuestionKind::from_metadata(Some(QuestionTypeName::Dropdown), &json!(null));
        assert_eq!(kind, QuestionKind::Dropdown(ChoiceMetadata::default()));
    }

    #[test]
    fn stale_fields_from_another_type_are_ignored() {
        let kind = QuestionKind::from_metadata(
            Some(QuestionTypeName::LinearScale),
            &json!({ "min": 0, "max": 10, "options": [{ "id": 1, "text": "old" }] }),
        );
        let scale = kind.scale().unwrap();
        assert_eq!((scale.min, scale.max), (0, 10));
    }
}
