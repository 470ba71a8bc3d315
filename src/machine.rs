use std::sync::Arc;

use crate::{
    action::{self, Action},
    config::{Content, Promo},
    plan::{Choice, Outbound, Plan},
    quiz::QuizVariant,
    session::{InMemorySessionStore, Session, SessionStore, UserKey},
};

const DEFAULT_NAME: &str = "пользователь";

/// Answer as it arrived, before it is resolved to text.
enum Reply {
    Text(String),
    Button {
        variant: QuizVariant,
        question: usize,
        option: usize,
    },
}

/// Moves users through their quizzes.
///
/// `handle_action` commits the session change before it returns the plan, so a
/// failed delivery never leaves a half-advanced session behind.
pub struct QuizMachine<S = InMemorySessionStore> {
    content: Arc<Content>,
    store: S,
}

impl<S: SessionStore> QuizMachine<S> {
    pub fn new(content: Arc<Content>, store: S) -> Self {
        Self { content, store }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn handle_action(&self, user: UserKey, action: Action) -> Plan {
        log::debug!("user {}: {}", user, action.kind());
        match action {
            Action::Start { first_name } => self.greet(first_name.as_deref()),
            Action::SelectQuiz(variant) => self.select_quiz(user, variant),
            Action::SubmitAnswer(text) => self.submit(user, Reply::Text(text)),
            Action::ChooseOption {
                variant,
                question,
                option,
            } => self.submit(
                user,
                Reply::Button {
                    variant,
                    question,
                    option,
                },
            ),
            Action::RequestGuide => self.guide(),
        }
    }

    fn greet(&self, first_name: Option<&str>) -> Plan {
        let name = first_name.filter(|n| !n.trim().is_empty()).unwrap_or(DEFAULT_NAME);
        let text = self.content.greeting.replace("{name}", name);
        Plan::from(self.menu(text))
    }

    fn select_quiz(&self, user: UserKey, variant: QuizVariant) -> Plan {
        // Starting over always wins: whatever was in progress is dropped.
        if let Some(old) = self.store.get(user) {
            log::debug!(
                "user {}: dropping {} at question {}",
                user,
                old.variant,
                old.cursor
            );
        }
        self.store.set(user, Session::new(variant));
        self.question(variant, 0)
    }

    fn submit(&self, user: UserKey, reply: Reply) -> Plan {
        self.store.update(user, |slot| {
            let Some(session) = slot.as_mut() else {
                log::debug!("user {}: answer without a session, ignoring", user);
                return Plan::empty();
            };
            let questions = self.content.quizzes.questions_for(session.variant);
            let Some(question) = questions.get(session.cursor) else {
                // Only reachable if the content shrank under a live session.
                log::warn!(
                    "user {}: cursor {} is past the end, dropping session",
                    user,
                    session.cursor
                );
                *slot = None;
                return Plan::empty();
            };

            let answer = match reply {
                Reply::Text(text) => text,
                Reply::Button {
                    variant,
                    question: index,
                    option,
                } => {
                    let current = variant == session.variant && index == session.cursor;
                    match question.options.get(option) {
                        Some(text) if current => text.clone(),
                        _ => {
                            log::debug!(
                                "user {}: stale button for {} question {} (at {} {}), ignoring",
                                user,
                                variant,
                                index,
                                session.variant,
                                session.cursor
                            );
                            return Plan::empty();
                        }
                    }
                }
            };
            session.record(&question.text, answer);

            if session.cursor < questions.len() {
                return self.question(session.variant, session.cursor);
            }

            let plan = self.complete(user, session);
            // Removal is the last step, a completed session is never left stored.
            *slot = None;
            plan
        })
    }

    fn question(&self, variant: QuizVariant, index: usize) -> Plan {
        let Some(question) = self.content.quizzes.question(variant, index) else {
            return Plan::empty();
        };
        let choices = question
            .options
            .iter()
            .enumerate()
            .map(|(option, label)| {
                Choice::new(label.clone(), action::answer_token(variant, index, option))
            });
        Plan::from(Outbound::text(question.text.clone()).with_choices(choices))
    }

    fn complete(&self, user: UserKey, session: &Session) -> Plan {
        let result = if session.variant.is_scored() {
            let scoring = &self.content.scoring;
            let yes_count = scoring.yes_count(&session.answers);
            log::info!(
                "user {} finished {}: {} affirmative",
                user,
                session.variant,
                yes_count
            );
            let mut text = format!(
                "Количество ответов \"{}\": {}",
                capitalize(&scoring.affirmative),
                yes_count
            );
            match scoring.score(&session.answers) {
                Some(tier) => {
                    text.push_str("\n\n");
                    text.push_str(&tier.description);
                }
                None => log::error!("no tier covers {} affirmative answers", yes_count),
            }
            Outbound::text(text)
        } else {
            log::info!("user {} finished {}", user, session.variant);
            promo_message(&self.content.call_to_action)
        };

        Plan::from(result)
            .push(promo_message(&self.content.promo))
            .push(self.menu(self.content.menu_prompt.clone()))
    }

    fn guide(&self) -> Plan {
        let guide = &self.content.guide;
        let message = match &guide.photo {
            Some(url) => Outbound::photo(url.clone(), guide.text.clone()),
            None => Outbound::text(guide.text.clone()),
        };
        Plan::from(message.with_link(guide.link.clone()))
    }

    fn menu(&self, text: String) -> Outbound {
        let quizzes = &self.content.quizzes;
        Outbound::text(text).with_choices(
            QuizVariant::ALL
                .into_iter()
                .map(|v| Choice::new(quizzes.quiz(v).label.clone(), action::quiz_token(v))),
        )
    }
}

fn promo_message(promo: &Promo) -> Outbound {
    let message = Outbound::text(promo.text.clone()).with_link(promo.link.clone());
    match &promo.more_info {
        Some(label) => message.with_choices([Choice::new(label.clone(), action::guide_token())]),
        None => message,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
