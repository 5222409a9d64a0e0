use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::types::Question;
use crate::combat::types::Tier;
use crate::error::Result;
use crate::utils::persistence::{read_json_value, write_json_atomic};

fn catalog(entries: &[(&str, [&str; 4], &str, Tier)]) -> Vec<Question> {
    entries
        .iter()
        .filter_map(|(text, options, answer, tier)| Question::new(text, options, answer, *tier).ok())
        .collect()
}

/// The two questions written when no question file exists.
pub fn starter_questions() -> Vec<Question> {
    catalog(&[
        ("What is 2 + 2?", ["3", "4", "5", "6"], "4", Tier::Easy),
        (
            "What is the capital of France?",
            ["London", "Berlin", "Paris", "Madrid"],
            "Paris",
            Tier::Medium,
        ),
    ])
}

/// Two questions per tier, written by the admin menu.
pub fn sample_questions() -> Vec<Question> {
    catalog(&[
        ("What is 2 + 2?", ["3", "4", "5", "6"], "4", Tier::Easy),
        (
            "What is the capital of France?",
            ["London", "Berlin", "Paris", "Madrid"],
            "Paris",
            Tier::Easy,
        ),
        ("What is 15 × 8?", ["110", "120", "130", "140"], "120", Tier::Medium),
        (
            "Which planet is known as the Red Planet?",
            ["Venus", "Mars", "Jupiter", "Saturn"],
            "Mars",
            Tier::Medium,
        ),
        ("What is the square root of 144?", ["11", "12", "13", "14"], "12", Tier::Hard),
        (
            "Who wrote 'To Kill a Mockingbird'?",
            ["Harper Lee", "Mark Twain", "Ernest Hemingway", "F. Scott Fitzgerald"],
            "Harper Lee",
            Tier::Hard,
        ),
        ("What is the chemical symbol for Gold?", ["Go", "Gd", "Au", "Ag"], "Au", Tier::Boss),
        ("In which year did World War II end?", ["1944", "1945", "1946", "1947"], "1945", Tier::Boss),
    ])
}

/// Which question difficulties a battle tier draws from.
pub fn pool_tiers(tier: Tier) -> &'static [Tier] {
    match tier {
        Tier::Easy => &[Tier::Easy],
        Tier::Medium => &[Tier::Easy, Tier::Medium],
        Tier::Hard => &[Tier::Medium, Tier::Hard],
        Tier::Boss => &[Tier::Boss],
    }
}

/// The validated questions of one question file.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    path: PathBuf,
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(path: impl Into<PathBuf>, questions: Vec<Question>) -> Self {
        Self {
            path: path.into(),
            questions,
        }
    }

    /// Loads and validates the question file.
    ///
    /// A missing, unreadable, or non-list file is replaced with the starter
    /// questions. Invalid records are skipped; a file with no valid record
    /// falls back to the starter questions in memory.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match read_json_value(&path) {
            Ok(Some(Value::Array(records))) => records,
            Ok(_) => return Self::seed(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "question file unreadable");
                return Self::seed(path);
            }
        };

        let mut questions = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match Question::from_value(record) {
                Ok(question) => questions.push(question),
                Err(e) => warn!(index, error = %e, "skipping invalid question"),
            }
        }
        if questions.is_empty() {
            warn!(path = %path.display(), "no valid questions found, using starter set");
            questions = starter_questions();
        }
        info!(count = questions.len(), path = %path.display(), "questions loaded");
        Self { path, questions }
    }

    fn seed(path: PathBuf) -> Self {
        let questions = starter_questions();
        if let Err(e) = write_json_atomic(&path, &questions) {
            warn!(error = %e, "could not write starter questions");
        }
        Self { path, questions }
    }

    /// Overwrites the question file with the sample set and switches to it.
    pub fn write_samples(&mut self) -> Result<usize> {
        let samples = sample_questions();
        write_json_atomic(&self.path, &samples)?;
        self.questions = samples;
        info!(count = self.questions.len(), "sample questions written");
        Ok(self.questions.len())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions eligible for a `tier` battle, or the whole bank when none are.
    pub fn pool_for_tier(&self, tier: Tier) -> Vec<Question> {
        let tiers = pool_tiers(tier);
        let pool: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| tiers.contains(&q.difficulty))
            .cloned()
            .collect();
        if pool.is_empty() {
            self.questions.clone()
        } else {
            pool
        }
    }

    /// Question count per difficulty.
    pub fn stats(&self) -> BTreeMap<Tier, usize> {
        let mut counts = BTreeMap::new();
        for question in &self.questions {
            *counts.entry(question.difficulty).or_insert(0) += 1;
        }
        counts
    }
}
