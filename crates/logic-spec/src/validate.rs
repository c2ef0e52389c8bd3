use serde_json::{Map, Value};

use crate::answers::{ValidationError, ValidationResult};
use crate::eval::numeric_value;
use crate::spec::question::{QuestionOptions, QuestionSpec};
use crate::spec::survey::SurveySpec;
use crate::visibility::resolve_visibility;

/// Validates a submission against the questions currently visible to the
/// respondent. Hidden questions are exempt from `required`; whatever stale
/// answers they carry are ignored here and dropped by [`filter_visible`].
pub fn validate(spec: &SurveySpec, answers: &Value) -> ValidationResult {
    let visible = resolve_visibility(spec, answers);
    let answer_map = answers.as_object().cloned().unwrap_or_default();

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for question in &spec.questions {
        if !visible.contains(&question.id) {
            continue;
        }

        match answer_map.get(&question.id) {
            None => {
                if question.required {
                    missing_required.push(question.id.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(question, value) {
                    errors.push(error);
                }
            }
        }
    }

    let all_ids: std::collections::BTreeSet<_> = spec
        .questions
        .iter()
        .map(|question| question.id.clone())
        .collect();
    let unknown_fields: Vec<String> = answer_map
        .keys()
        .filter(|key| !all_ids.contains(*key))
        .cloned()
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

/// Drops entries for hidden questions from a submission payload, so answers
/// given before a question was hidden are never submitted.
pub fn filter_visible(spec: &SurveySpec, answers: &Value) -> Value {
    let visible = resolve_visibility(spec, answers);
    let filtered: Map<String, Value> = answers
        .as_object()
        .map(|map| {
            map.iter()
                .filter(|(key, _)| visible.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    Value::Object(filtered)
}

fn validate_value(question: &QuestionSpec, value: &Value) -> Option<ValidationError> {
    if !matches_shape(question, value) {
        return Some(base_error(
            question,
            "answer shape does not match question type",
            "shape_mismatch",
        ));
    }

    match &question.options {
        QuestionOptions::MultipleChoice { choices } | QuestionOptions::Dropdown { choices } => {
            if let Some(text) = value.as_str()
                && !choices.iter().any(|choice| choice == text)
            {
                return Some(base_error(
                    question,
                    "answer is not one of the offered choices",
                    "choice_mismatch",
                ));
            }
        }
        QuestionOptions::Checkbox { choices } => {
            if let Some(selected) = value.as_array() {
                for entry in selected {
                    match entry.as_str() {
                        Some(text) if choices.iter().any(|choice| choice == text) => {}
                        Some(_) => {
                            return Some(base_error(
                                question,
                                "selection is not one of the offered choices",
                                "choice_mismatch",
                            ));
                        }
                        None => {
                            return Some(base_error(
                                question,
                                "answer shape does not match question type",
                                "shape_mismatch",
                            ));
                        }
                    }
                }
            }
        }
        QuestionOptions::RatingScale { min, max } => match numeric_value(value) {
            Some(rating) => {
                if rating < *min as f64 || rating > *max as f64 {
                    return Some(base_error(question, "rating is out of range", "rating_range"));
                }
            }
            None => {
                return Some(base_error(
                    question,
                    "answer shape does not match question type",
                    "shape_mismatch",
                ));
            }
        },
        QuestionOptions::YesNo => {
            if let Some(text) = value.as_str()
                && text != "Yes"
                && text != "No"
            {
                return Some(base_error(
                    question,
                    "answer is not one of the offered choices",
                    "choice_mismatch",
                ));
            }
        }
        QuestionOptions::TextInput => {}
    }

    None
}

fn matches_shape(question: &QuestionSpec, value: &Value) -> bool {
    match question.options {
        QuestionOptions::MultipleChoice { .. }
        | QuestionOptions::Dropdown { .. }
        | QuestionOptions::YesNo
        | QuestionOptions::TextInput => value.is_string(),
        QuestionOptions::Checkbox { .. } => value.is_array(),
        // Ratings arrive as numbers or numeric strings; numeric_value settles it.
        QuestionOptions::RatingScale { .. } => value.is_number() || value.is_string(),
    }
}

fn base_error(question: &QuestionSpec, message: &str, code: &str) -> ValidationError {
    ValidationError {
        question_id: Some(question.id.clone()),
        message: message.into(),
        code: Some(code.into()),
    }
}
