use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{QuizError, Result};
use crate::quiz::console::{section_banner, Console};
use crate::quiz::record::{Record, RecordStore};
use crate::quiz::trivia_api::QuestionProvider;
use crate::quiz::{Answer, Category, Question};

pub enum Reply {
    /// Typed as-is.
    Raw(String),
    /// Types the key printed next to this answer text in the latest listing.
    Pick(String),
}

impl Reply {
    pub fn raw(text: &str) -> Self {
        Reply::Raw(text.to_string())
    }

    pub fn pick(answer: &str) -> Self {
        Reply::Pick(answer.to_string())
    }
}

#[derive(Default)]
pub struct ScriptedConsole {
    replies: VecDeque<Reply>,
    printed: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: replies.into(),
            ..Default::default()
        }
    }

    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.clone()
    }

    pub fn printed_contains(&self, needle: &str) -> bool {
        self.printed.iter().any(|line| line.contains(needle))
    }

    pub fn count_printed(&self, line: &str) -> usize {
        self.printed.iter().filter(|l| l.as_str() == line).count()
    }

    pub fn replies_left(&self) -> usize {
        self.replies.len()
    }

    fn key_for(&self, answer: &str) -> Option<String> {
        let suffix = format!(") {}", answer);
        self.printed
            .iter()
            .rev()
            .filter_map(|line| line.strip_suffix(&suffix))
            .find(|key| key.len() == 1 && key.chars().all(|c| c.is_ascii_lowercase()))
            .map(|key| key.to_string())
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    fn print_line(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }

    fn print_section(&mut self, title: &str) {
        self.printed.extend(section_banner(title));
    }

    async fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        match self.replies.pop_front() {
            None => Err(QuizError::InputClosed),
            Some(Reply::Raw(text)) => Ok(text),
            Some(Reply::Pick(answer)) => Ok(self.key_for(&answer).unwrap_or(answer)),
        }
    }
}

/// Question whose correct answer is `"right"`, with three wrong ones.
pub fn question(text: &str, category: Category) -> Question {
    let mut answers = vec![Answer::new("right".to_string(), true)];
    answers.extend((1..=3).map(|i| Answer::new(format!("wrong {}", i), false)));
    Question::new(text.to_string(), category, answers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Random(usize),
    InCategory(Category, usize),
}

/// Hands out pre-built batches in order; an empty queue behaves like an outage.
#[derive(Default)]
pub struct QueuedProvider {
    batches: Mutex<VecDeque<Vec<Question>>>,
    calls: Mutex<Vec<Call>>,
}

impl QueuedProvider {
    pub fn new(batches: Vec<Vec<Question>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Call) -> Result<Vec<Question>> {
        self.calls.lock().unwrap().push(call);
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| QuizError::ProviderUnavailable {
                attempts: 1,
                reason: "no more queued questions".to_string(),
            })
    }
}

#[async_trait]
impl QuestionProvider for QueuedProvider {
    async fn fetch_random(&self, count: usize) -> Result<Vec<Question>> {
        self.next(Call::Random(count))
    }

    async fn fetch_in_category(&self, category: Category, count: usize) -> Result<Vec<Question>> {
        if category == Category::Unknown {
            return Err(QuizError::UnknownCategory);
        }
        self.next(Call::InCategory(category, count))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    record: Cell<Option<Record>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn with(record: Record) -> Self {
        Self {
            record: Cell::new(Some(record)),
            saves: Cell::new(0),
        }
    }

    pub fn stored(&self) -> Option<Record> {
        self.record.get()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Option<Record> {
        self.record.get()
    }

    fn save(&self, record: &Record) -> Result<()> {
        self.record.set(Some(*record));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
