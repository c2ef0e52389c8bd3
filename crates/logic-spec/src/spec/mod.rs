pub mod logic;
pub mod question;
pub mod survey;

pub use logic::{LogicCondition, LogicRule, QuestionLogic, RuleValue};
pub use question::{QuestionOptions, QuestionSpec, QuestionType};
pub use survey::SurveySpec;
