use std::collections::HashMap;

use dashmap::{mapref::entry::Entry, DashMap};

use crate::quiz::QuizVariant;

/// Telegram user id.
pub type UserKey = u64;

/// One user's attempt at one quiz. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub variant: QuizVariant,
    /// Index of the question awaiting an answer. Always equals `answers.len()`.
    pub cursor: usize,
    /// Question prompt -> answer text exactly as the user gave it.
    pub answers: HashMap<String, String>,
}

impl Session {
    pub fn new(variant: QuizVariant) -> Self {
        Self {
            variant,
            cursor: 0,
            answers: HashMap::new(),
        }
    }

    pub fn record(&mut self, prompt: &str, answer: String) {
        self.answers.insert(prompt.to_string(), answer);
        self.cursor += 1;
    }
}

/// Where in-progress sessions live.
///
/// `update` runs its closure while holding the user's entry exclusively, so a
/// read-modify-write for one user never interleaves with another action for the
/// same user. Actions for different users don't wait on each other unless they
/// happen to share a shard.
pub trait SessionStore: Send + Sync {
    fn get(&self, user: UserKey) -> Option<Session>;
    fn set(&self, user: UserKey, session: Session);
    /// Hands the closure the user's slot. Leaving `None` in it deletes the session.
    /// This is the only way sessions are deleted, so removal happens under the same
    /// lock as the change that completes the quiz.
    fn update<R>(&self, user: UserKey, f: impl FnOnce(&mut Option<Session>) -> R) -> R;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<UserKey, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user: UserKey) -> Option<Session> {
        self.sessions.get(&user).map(|s| s.value().clone())
    }

    fn set(&self, user: UserKey, session: Session) {
        self.sessions.insert(user, session);
    }

    fn update<R>(&self, user: UserKey, f: impl FnOnce(&mut Option<Session>) -> R) -> R {
        // The entry keeps its shard write-locked until it is dropped.
        match self.sessions.entry(user) {
            Entry::Occupied(mut entry) => {
                let mut slot = Some(entry.get().clone());
                let out = f(&mut slot);
                match slot {
                    Some(session) => {
                        entry.insert(session);
                    }
                    None => {
                        entry.remove();
                    }
                }
                out
            }
            Entry::Vacant(entry) => {
                let mut slot = None;
                let out = f(&mut slot);
                if let Some(session) = slot {
                    entry.insert(session);
                }
                out
            }
        }
    }
}
