use std::collections::HashSet;

use log::{debug, info};

use crate::error::{QuizError, Result};
use crate::quiz::console::{option_keys, parse_menu_index, prompt_until, Console};
use crate::quiz::trivia_api::QuestionProvider;
use crate::quiz::{Category, Question};

/// How many answers a player gets to choose from.
pub const MAX_PRESENTED_ANSWERS: usize = 4;
/// How many questions a bonus round offers.
pub const BONUS_CHOICES: usize = 3;
/// Extra fetches a regular round makes to avoid repeating a question.
pub const DUPLICATE_REFETCHES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundKind {
    Regular,
    Bonus,
    CategoryChoice,
}

/// Per-kind scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub reward: i64,
    pub penalty: i64,
    /// Whether the answer extends or resets the streak.
    pub tracks_streak: bool,
    /// Whether the round shows up in the round count.
    pub counted: bool,
}

impl Scoring {
    pub fn apply(&self, correct: bool, score: i64, streak: u32) -> (i64, u32) {
        let score = if correct {
            score + self.reward
        } else {
            score - self.penalty
        };
        let streak = match (self.tracks_streak, correct) {
            (false, _) => streak,
            (true, true) => streak + 1,
            (true, false) => 0,
        };
        (score, streak)
    }
}

impl RoundKind {
    pub fn scoring(&self) -> Scoring {
        match self {
            RoundKind::Regular | RoundKind::CategoryChoice => Scoring {
                reward: 1,
                penalty: 1,
                tracks_streak: true,
                counted: true,
            },
            RoundKind::Bonus => Scoring {
                reward: 2,
                penalty: 0,
                tracks_streak: false,
                counted: false,
            },
        }
    }

    pub fn title(&self, number: u32) -> String {
        match self {
            RoundKind::Bonus => "BONUS ROUND".to_string(),
            RoundKind::Regular | RoundKind::CategoryChoice => format!("ROUND {}", number),
        }
    }
}

/// A round with its question settled, waiting to be played.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    kind: RoundKind,
    number: u32,
    initial_score: i64,
    initial_streak: u32,
    question: Question,
}

/// A round after the player answered. Nothing about it changes any more.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedRound {
    kind: RoundKind,
    number: u32,
    initial_score: i64,
    initial_streak: u32,
    question: Question,
    answered_correctly: bool,
    final_score: i64,
    final_streak: u32,
}

impl Round {
    pub fn new(
        kind: RoundKind,
        number: u32,
        initial_score: i64,
        initial_streak: u32,
        question: Question,
    ) -> Self {
        Self {
            kind,
            number,
            initial_score,
            initial_streak,
            question,
        }
    }

    /// Gets the question for a round of `kind`, asking the player to pick
    /// one first when the kind calls for it.
    ///
    /// `asked` holds the texts already seen this session; regular rounds
    /// try a few times to avoid them.
    pub async fn prepare<P, C>(
        kind: RoundKind,
        number: u32,
        initial_score: i64,
        initial_streak: u32,
        provider: &P,
        console: &mut C,
        asked: &HashSet<String>,
    ) -> Result<Self>
    where
        P: QuestionProvider + ?Sized,
        C: Console + ?Sized,
    {
        let question = match kind {
            RoundKind::Regular => fresh_random_question(provider, asked).await?,
            RoundKind::Bonus => choose_bonus_question(provider, console).await?,
            RoundKind::CategoryChoice => {
                let category = choose_category(console).await?;
                first(provider.fetch_in_category(category, 1).await?)?
            }
        };
        debug!("Round {} ({:?}) question: {:?}", number, kind, question.text());
        Ok(Self::new(kind, number, initial_score, initial_streak, question))
    }

    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Shows the question, waits for a valid answer and scores it.
    pub async fn play<C>(self, console: &mut C) -> Result<PlayedRound>
    where
        C: Console + ?Sized,
    {
        let answers = self
            .question
            .presented_answers(Some(MAX_PRESENTED_ANSWERS), &mut rand::thread_rng())?;
        let keys = option_keys(answers.len());

        console.print_section(&self.kind.title(self.number));
        console.print_line("");
        console.print_line(&format!("Current score: {}", self.initial_score));
        console.print_line("");
        console.print_line(&format!("(Category: {})", self.question.category().label()));
        console.print_line("");
        console.print_line(self.question.text());
        console.print_line("");
        for (key, answer) in keys.iter().zip(&answers) {
            console.print_line(&format!("{}) {}", key, answer.text()));
        }
        console.print_line("");

        let choice = prompt_until(console, "Answer: ", |input| {
            let input = input.to_lowercase();
            keys.iter().position(|k| *k == input)
        })
        .await?;
        let correct = answers[choice].is_correct();

        let scoring = self.kind.scoring();
        if correct {
            console.print_line(&format!("GOOD! +{} points", scoring.reward));
        } else {
            if scoring.penalty > 0 {
                console.print_line(&format!("WRONG! -{} points", scoring.penalty));
            } else {
                console.print_line("WRONG! Don't worry, there was no point deduction");
            }
            if let Some(idx) = answers.iter().position(|a| a.is_correct()) {
                console.print_line(&format!(
                    "The correct answer was: {}) {}",
                    keys[idx],
                    answers[idx].text()
                ));
            }
        }
        console.print_line("");

        Ok(self.finish(correct))
    }

    /// Applies the kind's scoring to the answer. This is the only way to get
    /// a `PlayedRound`.
    pub fn finish(self, answered_correctly: bool) -> PlayedRound {
        let (final_score, final_streak) =
            self.kind
                .scoring()
                .apply(answered_correctly, self.initial_score, self.initial_streak);
        info!(
            "Round {} ({:?}) {}: score {} -> {}, streak {} -> {}",
            self.number,
            self.kind,
            if answered_correctly { "won" } else { "lost" },
            self.initial_score,
            final_score,
            self.initial_streak,
            final_streak
        );
        PlayedRound {
            kind: self.kind,
            number: self.number,
            initial_score: self.initial_score,
            initial_streak: self.initial_streak,
            question: self.question,
            answered_correctly,
            final_score,
            final_streak,
        }
    }
}

impl PlayedRound {
    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn initial_score(&self) -> i64 {
        self.initial_score
    }

    pub fn initial_streak(&self) -> u32 {
        self.initial_streak
    }

    pub fn answered_correctly(&self) -> bool {
        self.answered_correctly
    }

    pub fn final_score(&self) -> i64 {
        self.final_score
    }

    pub fn final_streak(&self) -> u32 {
        self.final_streak
    }

    pub fn score_increased(&self) -> bool {
        self.final_score > self.initial_score
    }
}

fn first(questions: Vec<Question>) -> Result<Question> {
    questions
        .into_iter()
        .next()
        .ok_or_else(|| QuizError::DataIntegrity("provider returned no questions".to_string()))
}

async fn fresh_random_question<P>(provider: &P, asked: &HashSet<String>) -> Result<Question>
where
    P: QuestionProvider + ?Sized,
{
    let mut question = first(provider.fetch_random(1).await?)?;
    for _ in 0..DUPLICATE_REFETCHES {
        if !asked.contains(question.text()) {
            break;
        }
        debug!("Already asked {:?}, fetching another one", question.text());
        question = first(provider.fetch_random(1).await?)?;
    }
    Ok(question)
}

async fn choose_bonus_question<P, C>(provider: &P, console: &mut C) -> Result<Question>
where
    P: QuestionProvider + ?Sized,
    C: Console + ?Sized,
{
    let mut questions = provider.fetch_random(BONUS_CHOICES).await?;
    if questions.is_empty() {
        return Err(QuizError::DataIntegrity(
            "provider returned no questions".to_string(),
        ));
    }

    console.print_section("BONUS ROUND");
    console.print_line("");
    console.print_line("In a BONUS ROUND you can choose the question that you want to answer");
    console.print_line("");
    for (i, question) in questions.iter().enumerate() {
        console.print_line(&format!("{}) {}", i + 1, question.text()));
    }
    console.print_line("");

    let count = questions.len();
    let idx = prompt_until(
        console,
        "Choose the question that you want to answer: ",
        |input| parse_menu_index(input, count),
    )
    .await?;
    console.print_line("");
    Ok(questions.swap_remove(idx))
}

async fn choose_category<C>(console: &mut C) -> Result<Category>
where
    C: Console + ?Sized,
{
    let labels = Category::labels();

    console.print_section("CATEGORY CHOICE");
    console.print_line("");
    console.print_line("In this round you can choose the category of your question");
    console.print_line("");
    for (i, label) in labels.iter().enumerate() {
        console.print_line(&format!("{}. {}", i + 1, label));
    }
    console.print_line("");

    let idx = prompt_until(console, "Choose a category: ", |input| {
        parse_menu_index(input, labels.len())
    })
    .await?;
    console.print_line("");
    Ok(Category::from_label(labels[idx]))
}
