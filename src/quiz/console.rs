use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::{QuizError, Result};

const SECTION_WIDTH: usize = 55;

/// Where the game talks to the player.
#[async_trait]
pub trait Console: Send {
    fn print_line(&mut self, text: &str);

    fn print_section(&mut self, title: &str);

    /// Blocks until the player enters a line. No validation happens here.
    async fn read_line(&mut self, prompt: &str) -> Result<String>;
}

pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for Terminal {
    fn print_line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn print_section(&mut self, title: &str) {
        for line in section_banner(title) {
            println!("{}", line);
        }
    }

    async fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(QuizError::InputClosed),
        }
    }
}

/// `#` rule, centred upper-case title, `#` rule.
pub fn section_banner(title: &str) -> [String; 3] {
    let rule = "#".repeat(SECTION_WIDTH);
    let title = title.to_uppercase();
    let padding = SECTION_WIDTH.saturating_sub(title.chars().count()) / 2;
    [rule.clone(), format!("{}{}", " ".repeat(padding), title), rule]
}

/// Short labels for a list of options: a, b, c, ...
pub fn option_keys(count: usize) -> Vec<String> {
    (b'a'..=b'z')
        .take(count)
        .map(|c| char::from(c).to_string())
        .collect()
}

/// Keeps asking until `parse` accepts the (trimmed) input.
///
/// Players can get it wrong as many times as they like; there is no retry cap.
pub async fn prompt_until<C, T, F>(console: &mut C, prompt: &str, mut parse: F) -> Result<T>
where
    C: Console + ?Sized,
    F: FnMut(&str) -> Option<T>,
{
    loop {
        let input = console.read_line(prompt).await?;
        if let Some(value) = parse(input.trim()) {
            return Ok(value);
        }
        console.print_line("Invalid input!");
    }
}

/// Parses a 1-based menu index in `1..=len` into a 0-based one.
pub fn parse_menu_index(input: &str, len: usize) -> Option<usize> {
    match input.parse::<usize>() {
        Ok(idx) if (1..=len).contains(&idx) => Some(idx - 1),
        _ => None,
    }
}
