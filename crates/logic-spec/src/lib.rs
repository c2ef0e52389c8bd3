#![allow(missing_docs)]

pub mod answers;
pub mod catalog;
pub mod dependency;
pub mod eval;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use answers::{ValidationError, ValidationResult};
pub use catalog::{conditions_for, default_condition, is_condition_legal};
pub use dependency::{LogicIssue, SurveyReport, detect_circular_dependency, validate_survey};
pub use eval::rule_satisfied;
pub use spec::{
    LogicCondition, LogicRule, QuestionLogic, QuestionOptions, QuestionSpec, QuestionType,
    RuleValue, SurveySpec,
};
pub use validate::{filter_visible, validate};
pub use visibility::{VisibleSet, resolve_visibility};
