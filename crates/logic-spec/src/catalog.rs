use crate::spec::logic::LogicCondition;
use crate::spec::question::QuestionType;

const IDENTITY_CONDITIONS: &[LogicCondition] =
    &[LogicCondition::Equals, LogicCondition::NotEquals];

const CHECKBOX_CONDITIONS: &[LogicCondition] =
    &[LogicCondition::Contains, LogicCondition::NotContains];

const RATING_CONDITIONS: &[LogicCondition] = &[
    LogicCondition::Equals,
    LogicCondition::NotEquals,
    LogicCondition::GreaterThan,
    LogicCondition::LessThan,
    LogicCondition::GreaterThanOrEqual,
    LogicCondition::LessThanOrEqual,
];

const TEXT_CONDITIONS: &[LogicCondition] = &[
    LogicCondition::Equals,
    LogicCondition::NotEquals,
    LogicCondition::Contains,
];

/// Comparison operators legal for a question type, in picker order.
pub fn conditions_for(question_type: QuestionType) -> &'static [LogicCondition] {
    match question_type {
        QuestionType::MultipleChoice | QuestionType::Dropdown | QuestionType::YesNo => {
            IDENTITY_CONDITIONS
        }
        QuestionType::Checkbox => CHECKBOX_CONDITIONS,
        QuestionType::RatingScale => RATING_CONDITIONS,
        QuestionType::TextInput => TEXT_CONDITIONS,
    }
}

/// Condition preselected when a trigger question is first chosen.
pub fn default_condition(question_type: QuestionType) -> LogicCondition {
    conditions_for(question_type)[0]
}

/// Whether a condition may appear on a rule whose trigger has this type.
pub fn is_condition_legal(question_type: QuestionType, condition: LogicCondition) -> bool {
    conditions_for(question_type).contains(&condition)
}

impl LogicCondition {
    /// Stable internal label; user-facing translation happens in the UI layer.
    pub fn label(&self) -> &'static str {
        match self {
            LogicCondition::Equals => "equals",
            LogicCondition::NotEquals => "does not equal",
            LogicCondition::Contains => "contains",
            LogicCondition::NotContains => "does not contain",
            LogicCondition::GreaterThan => "greater than",
            LogicCondition::LessThan => "less than",
            LogicCondition::GreaterThanOrEqual => "greater than or equal to",
            LogicCondition::LessThanOrEqual => "less than or equal to",
        }
    }
}
