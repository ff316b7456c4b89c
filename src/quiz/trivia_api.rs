use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{QuizError, Result};
use crate::quiz::{Answer, Category, Question};
use crate::retry::{retry_async, RetryConfig};

/// The only question type the game knows how to ask.
pub const MULTIPLE_CHOICE: &str = "Multiple Choice";

/// Source of questions for the game.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Exactly `count` random questions.
    async fn fetch_random(&self, count: usize) -> Result<Vec<Question>>;

    /// Exactly `count` questions from `category`, which must not be `Unknown`.
    async fn fetch_in_category(&self, category: Category, count: usize) -> Result<Vec<Question>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    categories: Vec<Category>,
    limit: usize,
}

impl QuestionRequest {
    pub const DEFAULT_LIMIT: usize = 1;

    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn categories(mut self, values: &[Category]) -> Result<Self> {
        for value in values {
            if *value == Category::Unknown {
                return Err(QuizError::UnknownCategory);
            }
            if !self.categories.contains(value) {
                self.categories.push(*value);
            }
        }
        Ok(self)
    }

    pub fn limit(mut self, value: usize) -> Self {
        self.limit = value;
        self
    }

    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.categories.is_empty() {
            let keys = self
                .categories
                .iter()
                .map(|c| c.key())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("categories", keys));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }
}

impl Default for QuestionRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// One item of the API's JSON array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub category: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl RawQuestion {
    pub fn into_question(self) -> Question {
        let mut answers = self
            .incorrect_answers
            .into_iter()
            .map(|text| Answer::new(text, false))
            .collect::<Vec<_>>();
        answers.push(Answer::new(self.correct_answer, true));
        Question::new(self.question, Category::from_label(&self.category), answers)
    }
}

/// Drops everything that isn't multiple choice, builds `Question`s from the
/// rest and drops those that cannot be asked.
pub fn convert_response(raw: Vec<RawQuestion>) -> Vec<Question> {
    let total = raw.len();
    let multiple_choice = raw
        .into_iter()
        .filter(|q| q.kind == MULTIPLE_CHOICE)
        .map(RawQuestion::into_question)
        .collect::<Vec<_>>();
    if multiple_choice.len() < total {
        debug!(
            "Dropped {} question(s) that are not {:?}",
            total - multiple_choice.len(),
            MULTIPLE_CHOICE
        );
    }
    multiple_choice
        .into_iter()
        .filter(|q| match q.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropped malformed question: {}", e);
                false
            }
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("expected {expected} multiple-choice question(s), got {got}")]
    TooFew { expected: usize, got: usize },
}

pub struct TriviaApi {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl TriviaApi {
    pub fn new(base_url: String, timeout: Duration, retry: RetryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuizError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    pub async fn get_questions(&self, request: &QuestionRequest) -> Result<Vec<Question>> {
        retry_async(&self.retry, |attempt| self.send_once(request, attempt))
            .await
            .map_err(|e| QuizError::ProviderUnavailable {
                attempts: self.retry.max_attempts,
                reason: e.to_string(),
            })
    }

    async fn send_once(
        &self,
        request: &QuestionRequest,
        attempt: usize,
    ) -> std::result::Result<Vec<Question>, FetchError> {
        let params = request.query_params();
        info!(
            "Requesting questions from {} {:?} (attempt {})",
            self.base_url, params, attempt
        );

        let raw: Vec<RawQuestion> = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut questions = convert_response(raw);
        if questions.len() < request.limit {
            return Err(FetchError::TooFew {
                expected: request.limit,
                got: questions.len(),
            });
        }
        questions.truncate(request.limit);
        Ok(questions)
    }
}

#[async_trait]
impl QuestionProvider for TriviaApi {
    async fn fetch_random(&self, count: usize) -> Result<Vec<Question>> {
        self.get_questions(&QuestionRequest::new().limit(count))
            .await
    }

    async fn fetch_in_category(&self, category: Category, count: usize) -> Result<Vec<Question>> {
        let request = QuestionRequest::new().categories(&[category])?.limit(count);
        self.get_questions(&request).await
    }
}
