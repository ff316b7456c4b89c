use std::collections::HashSet;

use log::{info, warn};

use crate::error::Result;
use crate::quiz::console::Console;
use crate::quiz::record::{BrokenRecords, Record, RecordStore};
use crate::quiz::round::{PlayedRound, Round, RoundKind};
use crate::quiz::trivia_api::QuestionProvider;

pub const START_SCORE: i64 = 1;
pub const START_STREAK: u32 = 0;
/// Streak a won round needs to earn a bonus round.
pub const BONUS_STREAK_THRESHOLD: u32 = 3;
/// Every n-th round lets the player choose the category.
pub const CATEGORY_ROUND_INTERVAL: u32 = 5;

const WELCOME: &str = r#"

                        Welcome to

            ____       ______     _       _
           / __ \__  _/_  __/____(_)   __(_)___ _
          / /_/ / / / // / / ___/ / | / / / __ `/
         / ____/ /_/ // / / /  / /| |/ / / /_/ /
        /_/    \__, //_/ /_/  /_/ |___/_/\__,_/
              /____/
"#;

/// One play session: a run of rounds that stops once the score hits zero.
#[derive(Debug, Default)]
pub struct Game {
    rounds: Vec<PlayedRound>,
    bonus_eligible: bool,
    asked: HashSet<String>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rounds(&self) -> &[PlayedRound] {
        &self.rounds
    }

    pub fn current_score(&self) -> i64 {
        self.rounds
            .last()
            .map_or(START_SCORE, |r| r.final_score())
    }

    pub fn current_streak(&self) -> u32 {
        self.rounds
            .last()
            .map_or(START_STREAK, |r| r.final_streak())
    }

    /// Number of the last round played, bonus rounds included.
    pub fn current_round_number(&self) -> u32 {
        self.rounds.last().map_or(0, |r| r.number())
    }

    /// Rounds that count towards the round record (everything but bonus rounds).
    pub fn round_count(&self) -> u32 {
        self.rounds
            .iter()
            .filter(|r| r.kind().scoring().counted)
            .count() as u32
    }

    pub fn bonus_eligible(&self) -> bool {
        self.bonus_eligible
    }

    pub fn is_over(&self) -> bool {
        self.current_score() <= 0
    }

    pub fn next_round_kind(&self) -> RoundKind {
        if self.bonus_eligible {
            RoundKind::Bonus
        } else if (self.current_round_number() + 1) % CATEGORY_ROUND_INTERVAL == 0 {
            RoundKind::CategoryChoice
        } else {
            RoundKind::Regular
        }
    }

    /// Appends a finished round and works out whether a bonus round comes next.
    pub fn record_round(&mut self, round: PlayedRound) {
        self.bonus_eligible = match round.kind() {
            RoundKind::Bonus => false,
            RoundKind::Regular | RoundKind::CategoryChoice => {
                round.score_increased() && round.final_streak() >= BONUS_STREAK_THRESHOLD
            }
        };
        self.asked.insert(round.question().text().to_string());
        self.rounds.push(round);
    }

    /// Best score, round count and longest streak of this session.
    pub fn summary(&self) -> Record {
        let score = self
            .rounds
            .iter()
            .flat_map(|r| [r.initial_score(), r.final_score()])
            .max()
            .unwrap_or(START_SCORE);
        let streak = self
            .rounds
            .iter()
            .flat_map(|r| [r.initial_streak(), r.final_streak()])
            .max()
            .unwrap_or(START_STREAK);
        Record::new(score, self.round_count(), streak)
    }

    pub async fn play_next_round<P, C>(&mut self, provider: &P, console: &mut C) -> Result<()>
    where
        P: QuestionProvider + ?Sized,
        C: Console + ?Sized,
    {
        let kind = self.next_round_kind();
        let number = self.current_round_number() + 1;
        info!("Starting round {} ({:?})", number, kind);

        let round = Round::prepare(
            kind,
            number,
            self.current_score(),
            self.current_streak(),
            provider,
            console,
            &self.asked,
        )
        .await?;
        let played = round.play(console).await?;
        self.record_round(played);
        Ok(())
    }

    /// Plays rounds until the score drops to zero. The check happens between
    /// rounds, never in the middle of one.
    pub async fn play<P, C>(&mut self, provider: &P, console: &mut C) -> Result<Record>
    where
        P: QuestionProvider + ?Sized,
        C: Console + ?Sized,
    {
        while !self.is_over() {
            self.play_next_round(provider, console).await?;
        }
        let summary = self.summary();
        info!("Game over after {} round(s): {:?}", self.rounds.len(), summary);
        Ok(summary)
    }

    /// Whole session: welcome screen, rounds, summary and record update.
    ///
    /// An error from the rounds ends the session before the record store
    /// is touched.
    pub async fn run<P, C, S>(&mut self, provider: &P, console: &mut C, store: &S) -> Result<Record>
    where
        P: QuestionProvider + ?Sized,
        C: Console + ?Sized,
        S: RecordStore + ?Sized,
    {
        console.print_line(WELCOME);
        console.read_line("                  Press Enter to continue").await?;
        console.print_line("");

        let summary = self.play(provider, console).await?;
        show_game_over(console, &summary);
        settle_records(store, console, &summary);
        Ok(summary)
    }
}

fn show_game_over<C: Console + ?Sized>(console: &mut C, summary: &Record) {
    console.print_section("GAME OVER");
    console.print_line("");
    console.print_line("Summary:");
    console.print_line(&format!("- High score: {}", summary.score));
    console.print_line(&format!("- Number of rounds: {}", summary.round_count));
    console.print_line(&format!("- Longest streak: {}", summary.streak));
    console.print_line("");
}

/// Merges the session into the stored record and tells the player what they beat.
pub fn settle_records<S, C>(store: &S, console: &mut C, summary: &Record) -> BrokenRecords
where
    S: RecordStore + ?Sized,
    C: Console + ?Sized,
{
    let previous = store.load();
    let broken = BrokenRecords::compare(previous.as_ref(), summary);
    let merged = previous.map_or(*summary, |p| p.merge(summary));

    if broken.score {
        console.print_line(&format!("New record! High score: {}", summary.score));
    }
    if broken.round_count {
        console.print_line(&format!(
            "New record! Number of rounds: {}",
            summary.round_count
        ));
    }
    if broken.streak {
        console.print_line(&format!("New record! Longest streak: {}", summary.streak));
    }
    if !broken.any() {
        if let Some(p) = previous {
            console.print_line(&format!(
                "Records to beat: high score {}, {} rounds, streak of {}",
                p.score, p.round_count, p.streak
            ));
        }
    }

    if let Err(e) = store.save(&merged) {
        warn!("Could not save records: {}", e);
        console.print_line(&format!("(Your records could not be saved: {})", e));
    }
    broken
}
