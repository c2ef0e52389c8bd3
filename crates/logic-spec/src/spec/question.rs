use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::logic::QuestionLogic;

/// Fieldless discriminant for the supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TextInput,
    RatingScale,
    Checkbox,
    Dropdown,
    YesNo,
}

impl QuestionType {
    /// Wire label, matching the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TextInput => "text_input",
            QuestionType::RatingScale => "rating_scale",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Dropdown => "dropdown",
            QuestionType::YesNo => "yes_no",
        }
    }
}

/// Type-specific options carried by each question.
///
/// Choice kinds enumerate the values a rule may compare against; the rating
/// scale carries its bounds. The engine reads these only to vet rule values,
/// never to render anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionOptions {
    MultipleChoice { choices: Vec<String> },
    TextInput,
    RatingScale { min: i64, max: i64 },
    Checkbox { choices: Vec<String> },
    Dropdown { choices: Vec<String> },
    YesNo,
}

impl QuestionOptions {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionOptions::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionOptions::TextInput => QuestionType::TextInput,
            QuestionOptions::RatingScale { .. } => QuestionType::RatingScale,
            QuestionOptions::Checkbox { .. } => QuestionType::Checkbox,
            QuestionOptions::Dropdown { .. } => QuestionType::Dropdown,
            QuestionOptions::YesNo => QuestionType::YesNo,
        }
    }

    /// Enumerable answer values, for the kinds that have them.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            QuestionOptions::MultipleChoice { choices }
            | QuestionOptions::Checkbox { choices }
            | QuestionOptions::Dropdown { choices } => Some(choices),
            _ => None,
        }
    }
}

/// A single survey question plus its optional visibility logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionSpec {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display position; unique within a survey. A question may only depend
    /// on questions with a strictly smaller order.
    pub order: i64,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub options: QuestionOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<QuestionLogic>,
}
