use crate::quiz::{QuizBook, QuizVariant};

const QUIZ_PREFIX: &str = "quiz:";
const ANSWER_PREFIX: &str = "ans:";
const GUIDE_TOKEN: &str = "guide";

/// Something a user did, already decoded from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `/start`: greet and show the quiz menu.
    Start { first_name: Option<String> },
    SelectQuiz(QuizVariant),
    /// Free text while a quiz is running.
    SubmitAnswer(String),
    /// An answer button. Carries the quiz and question it was rendered for.
    ChooseOption {
        variant: QuizVariant,
        question: usize,
        option: usize,
    },
    RequestGuide,
}

impl Action {
    /// Decodes a callback token. Unknown tokens decode to `None` and are dropped.
    pub fn from_callback(data: &str) -> Option<Self> {
        if data == GUIDE_TOKEN {
            return Some(Action::RequestGuide);
        }
        if let Some(variant) = data.strip_prefix(QUIZ_PREFIX) {
            return QuizVariant::parse(variant).map(Action::SelectQuiz);
        }
        let mut parts = data.strip_prefix(ANSWER_PREFIX)?.split(':');
        let variant = QuizVariant::parse(parts.next()?)?;
        let question = parts.next()?.parse().ok()?;
        let option = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Action::ChooseOption {
            variant,
            question,
            option,
        })
    }

    /// Typed text is a quiz pick when it matches a menu label, otherwise an answer.
    /// Commands the bot doesn't know are dropped rather than recorded as answers.
    pub fn from_text(quizzes: &QuizBook, text: &str) -> Option<Self> {
        if text.trim_start().starts_with('/') {
            return None;
        }
        Some(match quizzes.variant_by_label(text) {
            Some(variant) => Action::SelectQuiz(variant),
            None => Action::SubmitAnswer(text.to_string()),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Start { .. } => "start",
            Action::SelectQuiz(_) => "select_quiz",
            Action::SubmitAnswer(_) => "submit_answer",
            Action::ChooseOption { .. } => "choose_option",
            Action::RequestGuide => "request_guide",
        }
    }
}

pub fn quiz_token(variant: QuizVariant) -> String {
    format!("{}{}", QUIZ_PREFIX, variant.as_str())
}

pub fn answer_token(variant: QuizVariant, question: usize, option: usize) -> String {
    format!("{}{}:{}:{}", ANSWER_PREFIX, variant.as_str(), question, option)
}

pub fn guide_token() -> String {
    GUIDE_TOKEN.to_string()
}
