use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::combat::types::Tier;
use crate::error::{GameError, Result};

/// A validated multiple-choice question.
///
/// Always has a non-empty prompt, at least two options that differ after
/// case folding, and an answer equal to one of the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub difficulty: Tier,
}

impl Question {
    pub fn new(question: &str, options: &[&str], answer: &str, difficulty: Tier) -> Result<Self> {
        let question = question.trim();
        if question.is_empty() {
            return Err(GameError::Validation("question text is empty".into()));
        }
        if options.len() < 2 {
            return Err(GameError::Validation(format!(
                "'{}' needs at least 2 options, has {}",
                question,
                options.len()
            )));
        }
        let mut seen = HashSet::new();
        for option in options {
            if !seen.insert(normalize(option)) {
                return Err(GameError::Validation(format!(
                    "'{}' has duplicate option '{}'",
                    question, option
                )));
            }
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(GameError::Validation(format!("'{}' has no answer", question)));
        }
        if !options.contains(&answer) {
            return Err(GameError::Validation(format!(
                "answer '{}' is not one of the options of '{}'",
                answer, question
            )));
        }

        Ok(Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
            difficulty,
        })
    }

    /// Validates one record of a question file. Unknown or missing
    /// difficulties become medium.
    pub fn from_value(value: &Value) -> Result<Self> {
        let record = value
            .as_object()
            .ok_or_else(|| GameError::Validation("record is not an object".into()))?;
        let text = record.get("question").and_then(Value::as_str).unwrap_or("");
        let options = match record.get("options") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| GameError::Validation(format!("'{}' has a non-text option", text)))
                })
                .collect::<Result<Vec<&str>>>()?,
            _ => {
                return Err(GameError::Validation(format!("'{}' has no option list", text)));
            }
        };
        let answer = record.get("answer").and_then(Value::as_str).unwrap_or("");
        let difficulty = record
            .get("difficulty")
            .and_then(Value::as_str)
            .map(Tier::parse_or_default)
            .unwrap_or_default();

        Question::new(text, &options, answer, difficulty)
    }

    /// Zero-based position of the answer among the options.
    pub fn answer_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| *o == self.answer)
            .unwrap_or_default()
    }
}

/// Case-folded, trimmed text used to compare typed answers with options.
pub(crate) fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
