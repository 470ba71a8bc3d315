pub mod score;

use std::fmt;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizVariant {
    /// "How aware are you": ends with a call to action, nothing is scored.
    Awareness,
    /// Pelvic floor dysfunction self-check, scored by counting affirmative answers.
    Dysfunction,
}

impl QuizVariant {
    pub const ALL: [QuizVariant; 2] = [QuizVariant::Awareness, QuizVariant::Dysfunction];

    pub fn is_scored(self) -> bool {
        matches!(self, QuizVariant::Dysfunction)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuizVariant::Awareness => "awareness",
            QuizVariant::Dysfunction => "dysfunction",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == token)
    }
}

impl fmt::Display for QuizVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    /// Each option is shown as is and stored as is when picked.
    pub options: Vec<String>,
}

impl Question {
    #[cfg(test)]
    pub fn new(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    /// Menu button label, also accepted as typed text.
    pub label: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    #[cfg(test)]
    pub fn new(label: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            label: label.into(),
            questions,
        }
    }

    fn validate(&self, variant: QuizVariant) -> Result<(), ConfigError> {
        if self.questions.is_empty() {
            return Err(ConfigError::NoQuestions(variant));
        }
        let mut seen = std::collections::HashSet::new();
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(ConfigError::NoOptions { variant, index });
            }
            // Answers are keyed by prompt text.
            if !seen.insert(question.text.as_str()) {
                return Err(ConfigError::DuplicatePrompt {
                    variant,
                    prompt: question.text.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Both quiz definitions. Loaded once and shared read-only by every session.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct QuizBook {
    pub awareness: Quiz,
    pub dysfunction: Quiz,
}

impl QuizBook {
    pub fn quiz(&self, variant: QuizVariant) -> &Quiz {
        match variant {
            QuizVariant::Awareness => &self.awareness,
            QuizVariant::Dysfunction => &self.dysfunction,
        }
    }

    pub fn questions_for(&self, variant: QuizVariant) -> &[Question] {
        &self.quiz(variant).questions
    }

    pub fn question(&self, variant: QuizVariant, index: usize) -> Option<&Question> {
        self.questions_for(variant).get(index)
    }

    /// Matches typed text against the menu labels, ignoring case and surrounding spaces.
    pub fn variant_by_label(&self, text: &str) -> Option<QuizVariant> {
        let text = text.trim().to_lowercase();
        QuizVariant::ALL
            .into_iter()
            .find(|v| self.quiz(*v).label.trim().to_lowercase() == text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for variant in QuizVariant::ALL {
            self.quiz(variant).validate(variant)?;
        }
        let awareness = self.awareness.label.trim().to_lowercase();
        if awareness == self.dysfunction.label.trim().to_lowercase() {
            return Err(ConfigError::DuplicateLabel(self.awareness.label.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn yes_no(text: &str) -> Question {
        Question::new(text, vec!["Да".to_string(), "Нет".to_string()])
    }

    pub fn book(awareness: usize, dysfunction: usize) -> QuizBook {
        QuizBook {
            awareness: Quiz::new(
                "На сколько вы осведомлены о МТД",
                (0..awareness).map(|i| yes_no(&format!("Осведомленность {}", i + 1))).collect(),
            ),
            dysfunction: Quiz::new(
                "Тест на ДМТД",
                (0..dysfunction).map(|i| yes_no(&format!("Симптом {}", i + 1))).collect(),
            ),
        }
    }

    #[test]
    fn variant_tokens_round_trip() {
        for variant in QuizVariant::ALL {
            assert_eq!(QuizVariant::parse(variant.as_str()), Some(variant));
        }
        assert_eq!(QuizVariant::parse("guide"), None);
        assert!(QuizVariant::Dysfunction.is_scored());
        assert!(!QuizVariant::Awareness.is_scored());
    }

    #[test]
    fn labels_match_loosely() {
        let book = book(3, 15);
        assert_eq!(
            book.variant_by_label("  тест на дмтд "),
            Some(QuizVariant::Dysfunction)
        );
        assert_eq!(
            book.variant_by_label("На сколько вы осведомлены о МТД"),
            Some(QuizVariant::Awareness)
        );
        assert_eq!(book.variant_by_label("Да"), None);
    }

    #[test]
    fn questions_are_ordered() {
        let book = book(3, 15);
        assert_eq!(book.questions_for(QuizVariant::Awareness).len(), 3);
        assert_eq!(
            book.question(QuizVariant::Dysfunction, 14).map(|q| q.text.as_str()),
            Some("Симптом 15")
        );
        assert!(book.question(QuizVariant::Dysfunction, 15).is_none());
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let book = book(0, 15);
        assert!(matches!(
            book.validate(),
            Err(ConfigError::NoQuestions(QuizVariant::Awareness))
        ));
    }

    #[test]
    fn question_without_options_is_rejected() {
        let mut book = book(3, 15);
        book.dysfunction.questions[4].options.clear();
        assert!(matches!(
            book.validate(),
            Err(ConfigError::NoOptions {
                variant: QuizVariant::Dysfunction,
                index: 4
            })
        ));
    }

    #[test]
    fn repeated_prompt_is_rejected() {
        let mut book = book(3, 15);
        book.awareness.questions[2] = yes_no("Осведомленность 1");
        assert!(matches!(
            book.validate(),
            Err(ConfigError::DuplicatePrompt { .. })
        ));
    }

    #[test]
    fn shared_label_is_rejected() {
        let mut book = book(3, 15);
        book.dysfunction.label = book.awareness.label.to_uppercase();
        assert!(matches!(book.validate(), Err(ConfigError::DuplicateLabel(_))));
    }
}
