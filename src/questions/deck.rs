use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::types::Question;
use crate::combat::types::Tier;
use crate::error::{GameError, Result};

/// Shuffled questions for one battle. Every question is asked once before
/// the deck is reshuffled.
#[derive(Debug, Clone)]
pub struct QuestionDeck {
    questions: Vec<Question>,
    next: usize,
}

impl QuestionDeck {
    pub fn new(tier: Tier, mut questions: Vec<Question>, rng: &mut impl Rng) -> Result<Self> {
        if questions.is_empty() {
            return Err(GameError::NoQuestions(tier));
        }
        questions.shuffle(rng);
        Ok(Self { questions, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn draw(&mut self, rng: &mut impl Rng) -> &Question {
        if self.next >= self.questions.len() {
            self.questions.shuffle(rng);
            self.next = 0;
            debug!(size = self.questions.len(), "question deck reshuffled");
        }
        let question = &self.questions[self.next];
        self.next += 1;
        question
    }
}
