use std::path::{Path, PathBuf};

use crate::{
    error::{ConfigError, StartupError},
    plan::Link,
    quiz::{score::Scoring, QuizBook},
};

/// Content shipped inside the binary, used when `QUIZ_CONTENT` is not set.
const BUNDLED_CONTENT: &str = include_str!("../quizzes.json");

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub content_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        let token = std::env::var("BOT_TOKEN")
            .or_else(|_| std::env::var("TELOXIDE_TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(StartupError::MissingToken)?;
        let content_path = std::env::var_os("QUIZ_CONTENT").map(PathBuf::from);
        Ok(Self {
            token,
            content_path,
        })
    }

    pub fn load_content(&self) -> Result<Content, ConfigError> {
        match &self.content_path {
            Some(path) => Content::from_file(path),
            None => Content::from_json(BUNDLED_CONTENT),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Promo {
    pub text: String,
    pub link: Link,
    /// Label of the "more info" button that opens the guide.
    #[serde(default)]
    pub more_info: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Guide {
    pub text: String,
    #[serde(default)]
    pub photo: Option<url::Url>,
    pub link: Link,
}

/// Everything the bot says. Fixed per deployment.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Content {
    /// `{name}` is replaced with the user's first name.
    pub greeting: String,
    pub menu_prompt: String,
    pub quizzes: QuizBook,
    pub scoring: Scoring,
    pub call_to_action: Promo,
    pub promo: Promo,
    pub guide: Guide,
}

impl Content {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let content: Content = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.quizzes.validate()?;
        self.scoring.validate()
    }
}
