use logic_spec::dependency::{LogicIssue, detect_circular_dependency, validate_survey};
use logic_spec::spec::logic::{LogicCondition, LogicRule, QuestionLogic, RuleValue};
use logic_spec::spec::question::{QuestionOptions, QuestionSpec};
use logic_spec::spec::survey::SurveySpec;

fn question(id: &str, order: i64, options: QuestionOptions) -> QuestionSpec {
    QuestionSpec {
        id: id.into(),
        title: id.into(),
        description: None,
        order,
        required: false,
        options,
        logic: None,
    }
}

fn rule(trigger: &str, condition: LogicCondition, value: &str) -> LogicRule {
    LogicRule {
        trigger_question_id: trigger.into(),
        condition,
        value: RuleValue::Single(value.into()),
    }
}

fn with_rules(mut question: QuestionSpec, rules: Vec<LogicRule>) -> QuestionSpec {
    question.logic = Some(QuestionLogic { rules });
    question
}

fn survey(questions: Vec<QuestionSpec>) -> SurveySpec {
    SurveySpec {
        id: "test-survey".into(),
        title: "Test survey".into(),
        description: None,
        questions,
    }
}

/// Q3 depends on Q2 depends on Q1.
fn chain() -> Vec<QuestionSpec> {
    vec![
        question("q1", 1, QuestionOptions::YesNo),
        with_rules(
            question("q2", 2, QuestionOptions::TextInput),
            vec![rule("q1", LogicCondition::Equals, "Yes")],
        ),
        with_rules(
            question("q3", 3, QuestionOptions::TextInput),
            vec![rule("q2", LogicCondition::Contains, "Toyota")],
        ),
    ]
}

#[test]
fn self_reference_is_rejected() {
    let questions = chain();
    assert!(detect_circular_dependency("q2", "q2", &questions));
}

#[test]
fn closing_a_chain_into_a_loop_is_rejected() {
    let questions = chain();
    assert!(detect_circular_dependency("q1", "q3", &questions));
}

#[test]
fn existing_backward_reference_stays_legal() {
    let questions = chain();
    assert!(!detect_circular_dependency("q2", "q1", &questions));
    assert!(!detect_circular_dependency("q3", "q1", &questions));
}

#[test]
fn non_preceding_trigger_is_rejected_without_existing_rules() {
    let questions = vec![
        question("q1", 1, QuestionOptions::YesNo),
        question("q2", 2, QuestionOptions::YesNo),
        question("q3", 2, QuestionOptions::YesNo),
    ];
    // Later question, and an equal-order sibling: neither precedes q1/q2.
    assert!(detect_circular_dependency("q1", "q2", &questions));
    assert!(detect_circular_dependency("q2", "q3", &questions));
}

#[test]
fn unknown_candidate_is_not_a_cycle() {
    let questions = chain();
    assert!(!detect_circular_dependency("q3", "q_removed", &questions));
}

#[test]
fn a_clean_survey_produces_no_issues() {
    let report = validate_survey(&survey(chain()));
    assert!(report.valid);
    assert!(report.issues.is_empty());
}

#[test]
fn cycles_and_forward_references_are_reported() {
    let questions = vec![
        with_rules(
            question("q1", 1, QuestionOptions::YesNo),
            vec![rule("q2", LogicCondition::Equals, "Yes")],
        ),
        with_rules(
            question("q2", 2, QuestionOptions::YesNo),
            vec![rule("q1", LogicCondition::Equals, "Yes")],
        ),
    ];
    let report = validate_survey(&survey(questions));
    assert!(!report.valid);
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::ForwardReference { question_id, .. } if question_id == "q1"
    )));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::CircularDependency { question_id, .. } if question_id == "q2"
    )));
}

#[test]
fn structural_defects_are_each_reported() {
    let questions = vec![
        question("q1", 1, QuestionOptions::YesNo),
        question("q1", 2, QuestionOptions::YesNo),
        question("q2", 2, QuestionOptions::TextInput),
        with_rules(question("q3", 3, QuestionOptions::TextInput), vec![]),
        with_rules(
            question("q4", 4, QuestionOptions::TextInput),
            vec![rule("q_removed", LogicCondition::Equals, "Yes")],
        ),
        with_rules(
            question("q5", 5, QuestionOptions::TextInput),
            vec![rule("q5", LogicCondition::Equals, "Yes")],
        ),
    ];
    let report = validate_survey(&survey(questions));
    assert!(!report.valid);
    assert!(report
        .issues
        .iter()
        .any(|issue| matches!(issue, LogicIssue::DuplicateId { .. })));
    assert!(report
        .issues
        .iter()
        .any(|issue| matches!(issue, LogicIssue::DuplicateOrder { order: 2, .. })));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::EmptyRules { question_id } if question_id == "q3"
    )));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::DanglingTrigger { trigger_id, .. } if trigger_id == "q_removed"
    )));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::SelfReference { question_id } if question_id == "q5"
    )));
}

#[test]
fn rule_values_are_checked_against_the_trigger_type() {
    let questions = vec![
        question(
            "q_color",
            1,
            QuestionOptions::Dropdown {
                choices: vec!["Red".into(), "Blue".into()],
            },
        ),
        question("q_rating", 2, QuestionOptions::RatingScale { min: 1, max: 5 }),
        with_rules(
            question("q_a", 3, QuestionOptions::TextInput),
            vec![rule("q_color", LogicCondition::Equals, "Green")],
        ),
        with_rules(
            question("q_b", 4, QuestionOptions::TextInput),
            vec![rule("q_rating", LogicCondition::GreaterThan, "9")],
        ),
        with_rules(
            question("q_c", 5, QuestionOptions::TextInput),
            vec![rule("q_rating", LogicCondition::Contains, "3")],
        ),
        with_rules(
            question("q_d", 6, QuestionOptions::TextInput),
            vec![LogicRule {
                trigger_question_id: "q_color".into(),
                condition: LogicCondition::Equals,
                value: RuleValue::Many(vec!["Red".into()]),
            }],
        ),
    ];
    let report = validate_survey(&survey(questions));
    assert!(!report.valid);
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::UnknownChoice { value, .. } if value == "Green"
    )));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::OutOfRange { value, .. } if value == "9"
    )));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::IllegalCondition { condition: LogicCondition::Contains, .. }
    )));
    assert!(report.issues.iter().any(|issue| matches!(
        issue,
        LogicIssue::ValueShape { question_id, .. } if question_id == "q_d"
    )));
}

#[test]
fn issues_render_stable_messages() {
    let issue = LogicIssue::ForwardReference {
        question_id: "q1".into(),
        trigger_id: "q9".into(),
    };
    assert_eq!(
        issue.to_string(),
        "question 'q1' depends on 'q9', which does not precede it"
    );
}
