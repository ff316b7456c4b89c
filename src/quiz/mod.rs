pub mod category;
pub mod console;
pub mod game;
pub mod record;
pub mod round;
pub mod trivia_api;

#[cfg(test)]
pub mod testing;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{QuizError, Result};
pub use category::Category;

/// A question needs its correct answer plus at least one wrong one.
pub const MIN_ANSWERS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question {
    text: String,
    category: Category,
    answers: Vec<Answer>,
}

impl Question {
    pub fn new(text: String, category: Category, answers: Vec<Answer>) -> Self {
        Self {
            text,
            category,
            answers,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn correct_answer(&self) -> Result<&Answer> {
        let mut correct = self.answers.iter().filter(|a| a.is_correct());
        match (correct.next(), correct.next()) {
            (Some(answer), None) => Ok(answer),
            (None, _) => Err(QuizError::DataIntegrity(format!(
                "question {:?} has no correct answer",
                self.text
            ))),
            (Some(_), Some(_)) => Err(QuizError::DataIntegrity(format!(
                "question {:?} has more than one correct answer",
                self.text
            ))),
        }
    }

    pub fn wrong_answers(&self) -> Result<Vec<&Answer>> {
        let wrong = self
            .answers
            .iter()
            .filter(|a| !a.is_correct())
            .collect::<Vec<_>>();
        if wrong.len() + 1 != self.answers.len() {
            return Err(QuizError::DataIntegrity(format!(
                "question {:?} has {} wrong answers out of {}",
                self.text,
                wrong.len(),
                self.answers.len()
            )));
        }
        Ok(wrong)
    }

    /// Checks that the question can be asked: one correct answer and at
    /// least `MIN_ANSWERS` answers overall.
    pub fn validate(&self) -> Result<()> {
        if self.answers.len() < MIN_ANSWERS {
            return Err(QuizError::DataIntegrity(format!(
                "question {:?} has {} answer(s), needs at least {}",
                self.text,
                self.answers.len(),
                MIN_ANSWERS
            )));
        }
        self.correct_answer()?;
        self.wrong_answers()?;
        Ok(())
    }

    /// Picks the answers to show the player, in display order.
    ///
    /// `n_max` caps the number of answers (`None` shows all of them). The
    /// correct answer is always included, the rest are wrong answers sampled
    /// without replacement, and the whole set is shuffled.
    pub fn presented_answers<R: Rng + ?Sized>(
        &self,
        n_max: Option<usize>,
        rng: &mut R,
    ) -> Result<Vec<Answer>> {
        self.validate()?;
        let total = self.answers.len();
        let n = n_max.map_or(total, |n| n.min(total));
        if n == 0 {
            return Err(QuizError::DataIntegrity(
                "at least one answer has to be presented".to_string(),
            ));
        }

        let correct = self.correct_answer()?;
        let wrong = self.wrong_answers()?;
        if n - 1 > wrong.len() {
            return Err(QuizError::DataIntegrity(format!(
                "asked for {} wrong answers, question only has {}",
                n - 1,
                wrong.len()
            )));
        }

        let mut answers = wrong
            .choose_multiple(rng, n - 1)
            .map(|a| (*a).clone())
            .collect::<Vec<_>>();
        answers.push(correct.clone());
        answers.shuffle(rng);
        Ok(answers)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    text: String,
    is_correct: bool,
}

impl Answer {
    pub fn new(text: String, is_correct: bool) -> Self {
        Self { text, is_correct }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}
