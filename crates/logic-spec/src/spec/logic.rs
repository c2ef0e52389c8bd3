use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Comparison operators available to visibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogicCondition {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl LogicCondition {
    /// Wire label, matching the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicCondition::Equals => "equals",
            LogicCondition::NotEquals => "not_equals",
            LogicCondition::Contains => "contains",
            LogicCondition::NotContains => "not_contains",
            LogicCondition::GreaterThan => "greater_than",
            LogicCondition::LessThan => "less_than",
            LogicCondition::GreaterThanOrEqual => "greater_than_or_equal",
            LogicCondition::LessThanOrEqual => "less_than_or_equal",
        }
    }
}

/// Comparison operand attached to a rule.
///
/// Every supported condition compares against a single string (numeric
/// conditions parse it); the list shape exists on the wire but satisfies no
/// condition and is flagged by the survey validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RuleValue {
    Single(String),
    Many(Vec<String>),
}

impl RuleValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            RuleValue::Single(value) => Some(value),
            RuleValue::Many(_) => None,
        }
    }
}

/// One visibility rule: the owning question is shown only while the trigger
/// question's answer satisfies the condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogicRule {
    pub trigger_question_id: String,
    pub condition: LogicCondition,
    pub value: RuleValue,
}

/// Conditional-visibility block attached to a question.
///
/// All rules must hold for the question to be shown. "No logic" is encoded
/// as the absence of this block, not as an empty rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionLogic {
    pub rules: Vec<LogicRule>,
}
