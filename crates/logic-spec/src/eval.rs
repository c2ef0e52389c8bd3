use serde_json::Value;

use crate::catalog;
use crate::spec::logic::{LogicCondition, LogicRule, RuleValue};
use crate::spec::question::{QuestionSpec, QuestionType};

/// Evaluates one rule against the trigger question's current answer.
///
/// Total over malformed input: a wrong-shaped answer, a condition the
/// trigger's type does not support, or an unparseable number all yield
/// `false`. The caller handles missing answers and hidden triggers.
pub fn rule_satisfied(trigger: &QuestionSpec, answer: &Value, rule: &LogicRule) -> bool {
    let trigger_type = trigger.options.question_type();
    if !catalog::is_condition_legal(trigger_type, rule.condition) {
        return false;
    }

    let verdict = match rule.condition {
        LogicCondition::Equals => equality(trigger_type, answer, &rule.value),
        LogicCondition::NotEquals => {
            equality(trigger_type, answer, &rule.value).map(|equal| !equal)
        }
        LogicCondition::Contains => containment(trigger_type, answer, &rule.value),
        LogicCondition::NotContains => {
            containment(trigger_type, answer, &rule.value).map(|held| !held)
        }
        LogicCondition::GreaterThan
        | LogicCondition::LessThan
        | LogicCondition::GreaterThanOrEqual
        | LogicCondition::LessThanOrEqual => numeric_comparison(rule.condition, answer, &rule.value),
    };

    // None means the comparison was not meaningful; negated conditions fail
    // closed the same way as their positive counterparts.
    verdict.unwrap_or(false)
}

fn equality(trigger_type: QuestionType, answer: &Value, value: &RuleValue) -> Option<bool> {
    match trigger_type {
        QuestionType::RatingScale => {
            let left = numeric_value(answer)?;
            let right = parse_number(value.as_single()?)?;
            Some(left == right)
        }
        QuestionType::Checkbox => None,
        _ => {
            let left = answer.as_str()?;
            let right = value.as_single()?;
            Some(left == right)
        }
    }
}

fn containment(trigger_type: QuestionType, answer: &Value, value: &RuleValue) -> Option<bool> {
    let needle = value.as_single()?;
    match trigger_type {
        QuestionType::Checkbox => {
            let selected = answer.as_array()?;
            Some(selected.iter().any(|entry| entry.as_str() == Some(needle)))
        }
        QuestionType::TextInput => {
            let text = answer.as_str()?;
            Some(text.contains(needle))
        }
        _ => None,
    }
}

fn numeric_comparison(condition: LogicCondition, answer: &Value, value: &RuleValue) -> Option<bool> {
    let left = numeric_value(answer)?;
    let right = parse_number(value.as_single()?)?;
    match condition {
        LogicCondition::GreaterThan => Some(left > right),
        LogicCondition::LessThan => Some(left < right),
        LogicCondition::GreaterThanOrEqual => Some(left >= right),
        LogicCondition::LessThanOrEqual => Some(left <= right),
        _ => None,
    }
}

/// Rating answers arrive as JSON numbers or numeric strings.
pub(crate) fn numeric_value(answer: &Value) -> Option<f64> {
    match answer {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}
