use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::catalog;
use crate::spec::logic::{LogicCondition, LogicRule};
use crate::spec::question::{QuestionOptions, QuestionSpec, QuestionType};
use crate::spec::survey::SurveySpec;

/// Structural problems the rule editor must not persist.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogicIssue {
    #[error("duplicate question id '{question_id}'")]
    DuplicateId { question_id: String },
    #[error("questions '{first_id}' and '{question_id}' share display order {order}")]
    DuplicateOrder {
        question_id: String,
        first_id: String,
        order: i64,
    },
    #[error("question '{question_id}' has logic with no rules")]
    EmptyRules { question_id: String },
    #[error("question '{question_id}' references unknown trigger '{trigger_id}'")]
    DanglingTrigger {
        question_id: String,
        trigger_id: String,
    },
    #[error("question '{question_id}' references itself")]
    SelfReference { question_id: String },
    #[error("question '{question_id}' depends on '{trigger_id}', which does not precede it")]
    ForwardReference {
        question_id: String,
        trigger_id: String,
    },
    #[error("question '{question_id}' is part of a dependency cycle through '{trigger_id}'")]
    CircularDependency {
        question_id: String,
        trigger_id: String,
    },
    #[error(
        "condition '{}' is not available for {} trigger '{trigger_id}'",
        .condition.as_str(),
        .question_type.as_str()
    )]
    IllegalCondition {
        question_id: String,
        trigger_id: String,
        question_type: QuestionType,
        condition: LogicCondition,
    },
    #[error("rule on '{question_id}' has a value that does not fit condition '{}'", .condition.as_str())]
    ValueShape {
        question_id: String,
        condition: LogicCondition,
    },
    #[error("rule on '{question_id}' uses value '{value}', which trigger '{trigger_id}' does not offer")]
    UnknownChoice {
        question_id: String,
        trigger_id: String,
        value: String,
    },
    #[error("rule on '{question_id}' uses value '{value}', outside trigger '{trigger_id}' scale {min}..={max}")]
    OutOfRange {
        question_id: String,
        trigger_id: String,
        value: String,
        min: i64,
        max: i64,
    },
}

/// Outcome of a whole-survey structural check.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyReport {
    pub valid: bool,
    pub issues: Vec<LogicIssue>,
}

/// Verdict for a candidate rule edit: would making `question_id` depend on
/// `candidate_trigger_id` create a cycle or break the backward-order rule?
///
/// Returns a verdict, never an error; the authoring layer surfaces the
/// refusal to the user. Self-references and triggers that do not strictly
/// precede the owning question are rejected without traversal.
pub fn detect_circular_dependency(
    question_id: &str,
    candidate_trigger_id: &str,
    questions: &[QuestionSpec],
) -> bool {
    if question_id == candidate_trigger_id {
        return true;
    }

    let owner = questions.iter().find(|question| question.id == question_id);
    let candidate = questions
        .iter()
        .find(|question| question.id == candidate_trigger_id);
    if let (Some(owner), Some(candidate)) = (owner, candidate)
        && candidate.order >= owner.order
    {
        return true;
    }

    // With the hypothetical edge owner -> candidate in place, a cycle exists
    // exactly when the existing trigger edges lead from the candidate back to
    // the owner.
    reaches(candidate_trigger_id, question_id, questions)
}

fn reaches<'a>(from: &'a str, target: &str, questions: &'a [QuestionSpec]) -> bool {
    let mut stack: Vec<&str> = vec![from];
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        let Some(question) = questions.iter().find(|question| question.id == current) else {
            continue;
        };
        if let Some(logic) = &question.logic {
            for rule in &logic.rules {
                stack.push(&rule.trigger_question_id);
            }
        }
    }

    false
}

/// Checks the whole rule graph: ids and orders are unique, every trigger
/// exists and strictly precedes its dependent, no chain loops back on
/// itself, and every rule's condition and value fit the trigger's type.
pub fn validate_survey(spec: &SurveySpec) -> SurveyReport {
    let mut issues = Vec::new();

    let mut ids: BTreeSet<&str> = BTreeSet::new();
    for question in &spec.questions {
        if !ids.insert(&question.id) {
            issues.push(LogicIssue::DuplicateId {
                question_id: question.id.clone(),
            });
        }
    }

    let mut orders: BTreeMap<i64, &str> = BTreeMap::new();
    for question in &spec.questions {
        match orders.get(&question.order) {
            Some(first_id) => issues.push(LogicIssue::DuplicateOrder {
                question_id: question.id.clone(),
                first_id: (*first_id).to_string(),
                order: question.order,
            }),
            None => {
                orders.insert(question.order, &question.id);
            }
        }
    }

    for question in &spec.questions {
        let Some(logic) = &question.logic else {
            continue;
        };
        if logic.rules.is_empty() {
            issues.push(LogicIssue::EmptyRules {
                question_id: question.id.clone(),
            });
        }
        for rule in &logic.rules {
            check_rule(spec, question, rule, &mut issues);
        }
    }

    SurveyReport {
        valid: issues.is_empty(),
        issues,
    }
}

fn check_rule(
    spec: &SurveySpec,
    question: &QuestionSpec,
    rule: &LogicRule,
    issues: &mut Vec<LogicIssue>,
) {
    if rule.trigger_question_id == question.id {
        issues.push(LogicIssue::SelfReference {
            question_id: question.id.clone(),
        });
        return;
    }

    let Some(trigger) = spec.question(&rule.trigger_question_id) else {
        issues.push(LogicIssue::DanglingTrigger {
            question_id: question.id.clone(),
            trigger_id: rule.trigger_question_id.clone(),
        });
        return;
    };

    if trigger.order >= question.order {
        issues.push(LogicIssue::ForwardReference {
            question_id: question.id.clone(),
            trigger_id: trigger.id.clone(),
        });
        return;
    }

    if reaches(&trigger.id, &question.id, &spec.questions) {
        issues.push(LogicIssue::CircularDependency {
            question_id: question.id.clone(),
            trigger_id: trigger.id.clone(),
        });
        return;
    }

    let trigger_type = trigger.options.question_type();
    if !catalog::is_condition_legal(trigger_type, rule.condition) {
        issues.push(LogicIssue::IllegalCondition {
            question_id: question.id.clone(),
            trigger_id: trigger.id.clone(),
            question_type: trigger_type,
            condition: rule.condition,
        });
        return;
    }

    let Some(value) = rule.value.as_single() else {
        issues.push(LogicIssue::ValueShape {
            question_id: question.id.clone(),
            condition: rule.condition,
        });
        return;
    };

    match &trigger.options {
        QuestionOptions::RatingScale { min, max } => match value.trim().parse::<f64>() {
            Ok(number) => {
                if number < *min as f64 || number > *max as f64 {
                    issues.push(LogicIssue::OutOfRange {
                        question_id: question.id.clone(),
                        trigger_id: trigger.id.clone(),
                        value: value.to_string(),
                        min: *min,
                        max: *max,
                    });
                }
            }
            Err(_) => issues.push(LogicIssue::ValueShape {
                question_id: question.id.clone(),
                condition: rule.condition,
            }),
        },
        QuestionOptions::YesNo => {
            if value != "Yes" && value != "No" {
                issues.push(LogicIssue::UnknownChoice {
                    question_id: question.id.clone(),
                    trigger_id: trigger.id.clone(),
                    value: value.to_string(),
                });
            }
        }
        _ => {
            if let Some(choices) = trigger.options.choices()
                && !choices.iter().any(|choice| choice == value)
            {
                issues.push(LogicIssue::UnknownChoice {
                    question_id: question.id.clone(),
                    trigger_id: trigger.id.clone(),
                    value: value.to_string(),
                });
            }
        }
    }
}
