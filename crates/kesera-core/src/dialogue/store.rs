//! Conversation id -> dialogue state, with idle expiry.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::state::DialogueState;

#[derive(Debug)]
struct Session {
    state: DialogueState,
    touched: Instant,
}

/// In-memory session store. The lock covers state transitions only, never a lookup.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state, ignoring an expired session.
    pub fn get(&self, conversation: &str) -> Option<DialogueState> {
        let now = Instant::now();
        self.lock()
            .get(conversation)
            .filter(|s| !self.expired(s, now))
            .map(|s| s.state.clone())
    }

    /// (Re)start a conversation at `AwaitingRegNo`.
    pub fn start(&self, conversation: &str) {
        self.lock().insert(
            conversation.to_string(),
            Session {
                state: DialogueState::AwaitingRegNo,
                touched: Instant::now(),
            },
        );
    }

    /// Feed free text into a conversation. A completed dialogue is removed from the store.
    pub fn advance(&self, conversation: &str, text: &str) -> DialogueState {
        self.advance_at(conversation, text, Instant::now())
    }

    fn advance_at(&self, conversation: &str, text: &str, now: Instant) -> DialogueState {
        let mut sessions = self.lock();
        let current = sessions
            .remove(conversation)
            .filter(|s| !self.expired(s, now))
            .map(|s| s.state)
            .unwrap_or(DialogueState::AwaitingRegNo);
        let next = current.advance(text);
        if !next.is_complete() {
            sessions.insert(
                conversation.to_string(),
                Session {
                    state: next.clone(),
                    touched: now,
                },
            );
        }
        next
    }

    /// Drop a conversation. Returns true if it existed.
    pub fn remove(&self, conversation: &str) -> bool {
        self.lock().remove(conversation).is_some()
    }

    /// Remove sessions idle longer than the TTL. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| !self.expired(s, now));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, "swept idle chat sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expired(&self, session: &Session, now: Instant) -> bool {
        now.saturating_duration_since(session.touched) > self.ttl
    }
}
