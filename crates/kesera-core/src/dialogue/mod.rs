//! Chat-bot dialogue, independent of any chat transport.
//!
//! A conversation either sends everything at once (`/result <reg> <name>` or
//! a two-line message) or is walked through it: registration number first,
//! then first name. Partial input lives in a [`SessionStore`] keyed by
//! conversation id and expires when idle.

mod input;
mod state;
mod store;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::fetcher::FetchRequest;
use crate::render;
use crate::source::{Lookup, ResultSource};

pub use input::{parse, Input};
pub use state::DialogueState;
pub use store::SessionStore;

pub const PROMPT_REGISTRATION_NUMBER: &str = "Please send your registration number.";
pub const PROMPT_FIRST_NAME: &str = "Now send your first name.";
pub const CANCELLED: &str = "Cancelled.";
pub const RESULT_USAGE: &str = "Usage: /result <registration number> <first name>";
pub const HELP: &str = "Send /start to look up a result step by step, \
or /result <registration number> <first name>. /cancel stops a lookup.";

/// Bot answer in transport-neutral form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    /// Photo reference of a found student, for transports that can send images.
    pub photo: Option<String>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            photo: None,
        }
    }
}

pub struct ChatBot {
    source: Arc<dyn ResultSource>,
    sessions: SessionStore,
}

impl ChatBot {
    pub fn new(source: Arc<dyn ResultSource>, session_ttl: Duration) -> Self {
        Self {
            source,
            sessions: SessionStore::new(session_ttl),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handles one message. Blocks while a lookup is in flight.
    pub fn handle(&self, conversation: &str, text: &str) -> Reply {
        self.sessions.sweep();
        match input::parse(text) {
            Input::Start => {
                self.sessions.start(conversation);
                Reply::text(PROMPT_REGISTRATION_NUMBER)
            }
            Input::Help | Input::UnknownCommand => Reply::text(HELP),
            Input::Cancel => {
                self.sessions.remove(conversation);
                Reply::text(CANCELLED)
            }
            Input::ResultUsage => Reply::text(RESULT_USAGE),
            Input::Query(request) => {
                self.sessions.remove(conversation);
                self.answer(conversation, &request)
            }
            Input::Text(text) => match self.sessions.advance(conversation, text) {
                DialogueState::AwaitingRegNo => Reply::text(PROMPT_REGISTRATION_NUMBER),
                DialogueState::AwaitingFirstName { .. } => Reply::text(PROMPT_FIRST_NAME),
                DialogueState::Complete(request) => self.answer(conversation, &request),
            },
        }
    }

    fn answer(&self, conversation: &str, request: &FetchRequest) -> Reply {
        tracing::info!(
            conversation,
            registration_number = request.registration_number(),
            "chat lookup"
        );
        let outcome = self.source.lookup(request);
        let photo = match &outcome {
            Ok(Lookup::Found(record)) => record.photo.clone(),
            _ => None,
        };
        Reply {
            text: render::outcome_text(&outcome),
            photo,
        }
    }
}
