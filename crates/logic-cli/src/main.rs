use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use logic_spec::{
    QuestionType, SurveySpec, conditions_for, default_condition, filter_visible,
    resolve_visibility, validate, validate_survey,
};
use serde_json::{Map, Value, json};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Survey logic checks from the shell",
    long_about = "Resolves conditional question visibility, vets rule graphs, and validates submissions against survey specs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CliQuestionType {
    MultipleChoice,
    TextInput,
    RatingScale,
    Checkbox,
    Dropdown,
    YesNo,
}

impl CliQuestionType {
    fn into_question_type(self) -> QuestionType {
        match self {
            CliQuestionType::MultipleChoice => QuestionType::MultipleChoice,
            CliQuestionType::TextInput => QuestionType::TextInput,
            CliQuestionType::RatingScale => QuestionType::RatingScale,
            CliQuestionType::Checkbox => QuestionType::Checkbox,
            CliQuestionType::Dropdown => QuestionType::Dropdown,
            CliQuestionType::YesNo => QuestionType::YesNo,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Resolve which questions are currently visible for a set of answers.
    Visible {
        /// Path to the SurveySpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Optional JSON file containing the respondent's answers so far.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Output mode.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check a survey's rule graph for structural problems.
    Check {
        /// Path to the SurveySpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Output mode.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the comparison operators available for a question type.
    Conditions {
        /// Question type whose operators should be listed.
        #[arg(long = "type", value_enum)]
        question_type: CliQuestionType,
        /// Output mode.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a submission and emit the filtered answer payload.
    Submit {
        /// Path to the SurveySpec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// JSON file containing the submitted answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Output mode.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> CliResult<ExitCode> {
    match command {
        Command::Visible {
            spec,
            answers,
            format,
        } => {
            let spec = load_spec(&spec)?;
            let answers = load_answers(answers.as_deref())?;
            let visible = resolve_visibility(&spec, &answers);
            match format {
                OutputFormat::Text => {
                    println!("Visible questions:");
                    for question in spec.questions_in_order() {
                        if visible.contains(&question.id) {
                            println!(" - {} ({})", question.id, question.title);
                        }
                    }
                }
                OutputFormat::Json => {
                    let output = json!({
                        "survey_id": spec.id,
                        "visible": visible.iter().collect::<Vec<_>>(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { spec, format } => {
            let spec = load_spec(&spec)?;
            let report = validate_survey(&spec);
            match format {
                OutputFormat::Text => {
                    if report.valid {
                        println!("Logic OK: no issues found.");
                    } else {
                        println!("Found {} issue(s):", report.issues.len());
                        for issue in &report.issues {
                            println!(" - {issue}");
                        }
                    }
                }
                OutputFormat::Json => {
                    let output = json!({
                        "survey_id": spec.id,
                        "valid": report.valid,
                        "issues": report
                            .issues
                            .iter()
                            .map(|issue| issue.to_string())
                            .collect::<Vec<_>>(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Ok(exit_for(report.valid))
        }
        Command::Conditions {
            question_type,
            format,
        } => {
            let question_type = question_type.into_question_type();
            let conditions = conditions_for(question_type);
            let default = default_condition(question_type);
            match format {
                OutputFormat::Text => {
                    println!("Conditions for {}:", question_type.as_str());
                    for condition in conditions {
                        let mut entry = format!(" - {} ({})", condition.as_str(), condition.label());
                        if *condition == default {
                            entry.push_str(" [default]");
                        }
                        println!("{entry}");
                    }
                }
                OutputFormat::Json => {
                    let output = json!({
                        "question_type": question_type.as_str(),
                        "default": default.as_str(),
                        "conditions": conditions
                            .iter()
                            .map(|condition| json!({
                                "condition": condition.as_str(),
                                "label": condition.label(),
                            }))
                            .collect::<Vec<_>>(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Submit {
            spec,
            answers,
            format,
        } => {
            let spec = load_spec(&spec)?;
            let answers = load_answers(Some(&answers))?;
            let result = validate(&spec, &answers);
            let payload = filter_visible(&spec, &answers);
            match format {
                OutputFormat::Text => {
                    if result.valid {
                        println!("Submission valid.");
                    } else {
                        println!("Submission invalid.");
                        for error in &result.errors {
                            let question = error.question_id.as_deref().unwrap_or("<payload>");
                            println!(" - {}: {}", question, error.message);
                        }
                        if !result.missing_required.is_empty() {
                            println!("Missing required: {}", result.missing_required.join(", "));
                        }
                        if !result.unknown_fields.is_empty() {
                            println!("Unknown fields: {}", result.unknown_fields.join(", "));
                        }
                    }
                    println!("Submitted payload:");
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                }
                OutputFormat::Json => {
                    let output = json!({
                        "survey_id": spec.id,
                        "valid": result.valid,
                        "errors": result.errors,
                        "missing_required": result.missing_required,
                        "unknown_fields": result.unknown_fields,
                        "payload": payload,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Ok(exit_for(result.valid))
        }
    }
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_spec(path: &Path) -> CliResult<SurveySpec> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn load_answers(path: Option<&Path>) -> CliResult<Value> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Value::Object(Map::new())),
    }
}
