use super::types::{normalize, Question};

/// How one typed answer was judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerCheck {
    Correct,
    Incorrect,
    /// Not a usable answer; the attempt is spent and the reason shown.
    Invalid(String),
}

/// Judges one attempt: a 1-based option number, or an option's text
/// compared case-insensitively. The chosen option must equal the answer.
pub fn check_answer(question: &Question, input: &str) -> AnswerCheck {
    let input = input.trim();
    if input.is_empty() {
        return AnswerCheck::Invalid("Please enter an answer.".into());
    }

    let chosen = if input.chars().all(|c| c.is_ascii_digit()) {
        match input.parse::<usize>() {
            Ok(n) if (1..=question.options.len()).contains(&n) => &question.options[n - 1],
            _ => {
                return AnswerCheck::Invalid(format!(
                    "Enter a number between 1 and {}.",
                    question.options.len()
                ));
            }
        }
    } else {
        let typed = normalize(input);
        match question.options.iter().find(|o| normalize(o) == typed) {
            Some(option) => option,
            None => {
                return AnswerCheck::Invalid(
                    "Use an option number or exact option text.".into(),
                );
            }
        }
    };

    if *chosen == question.answer {
        AnswerCheck::Correct
    } else {
        AnswerCheck::Incorrect
    }
}
