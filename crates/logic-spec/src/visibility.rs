use std::collections::BTreeSet;

use serde_json::Value;

use crate::eval::rule_satisfied;
use crate::spec::survey::SurveySpec;

pub type VisibleSet = BTreeSet<String>;

/// Computes the set of question ids currently shown to the respondent.
///
/// Single forward pass in display order: every legal trigger precedes its
/// dependents, so a running visible set settles transitive hiding without
/// fixed-point iteration. A question with no logic is always visible. A rule
/// whose trigger is missing, hidden, or unanswered leaves its question
/// hidden.
pub fn resolve_visibility(spec: &SurveySpec, answers: &Value) -> VisibleSet {
    let answer_map = answers.as_object();
    let mut visible = VisibleSet::new();

    for question in spec.questions_in_order() {
        let Some(logic) = &question.logic else {
            visible.insert(question.id.clone());
            continue;
        };

        let shown = logic.rules.iter().all(|rule| {
            let Some(trigger) = spec.question(&rule.trigger_question_id) else {
                return false;
            };
            if !visible.contains(&trigger.id) {
                return false;
            }
            match answer_map.and_then(|map| map.get(&trigger.id)) {
                Some(answer) => rule_satisfied(trigger, answer, rule),
                None => false,
            }
        });

        if shown {
            visible.insert(question.id.clone());
        }
    }

    visible
}
