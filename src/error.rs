use thiserror::Error;

use crate::quiz::QuizVariant;

/// Problems with the quiz content. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read quiz content from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("quiz content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("quiz `{0}` has no questions")]
    NoQuestions(QuizVariant),
    #[error("question {index} of quiz `{variant}` has no options")]
    NoOptions { variant: QuizVariant, index: usize },
    #[error("quiz `{variant}` repeats the question prompt {prompt:?}")]
    DuplicatePrompt {
        variant: QuizVariant,
        prompt: String,
    },
    #[error("both quizzes use the menu label {0:?}")]
    DuplicateLabel(String),
    #[error("the affirmative token is empty")]
    EmptyAffirmative,
    #[error("the tier table is empty")]
    NoTiers,
    #[error("tier {index} starts at {found}, expected {expected}")]
    TierGap {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("tier {index} ends at {max} before it starts at {min}")]
    TierInverted { index: usize, min: usize, max: usize },
    #[error("tier {0} is unbounded but is not the last tier")]
    TierUnbounded(usize),
    #[error("the last tier must be unbounded")]
    TierCeiling,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("BOT_TOKEN is not defined in the environment variables")]
    MissingToken,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
