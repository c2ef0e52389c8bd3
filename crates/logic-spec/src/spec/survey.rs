use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::QuestionSpec;

/// Top-level survey definition consumed by the logic engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveySpec {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuestionSpec>,
}

impl SurveySpec {
    /// Questions sorted by display order.
    pub fn questions_in_order(&self) -> Vec<&QuestionSpec> {
        let mut ordered: Vec<&QuestionSpec> = self.questions.iter().collect();
        ordered.sort_by_key(|question| question.order);
        ordered
    }

    pub fn question(&self, id: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|question| question.id == id)
    }
}
