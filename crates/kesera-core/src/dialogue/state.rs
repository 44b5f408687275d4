//! Per-conversation dialogue state.

use crate::fetcher::FetchRequest;

/// Where a conversation stands in collecting a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueState {
    AwaitingRegNo,
    AwaitingFirstName { registration_number: String },
    /// Both values collected; the session ends here.
    Complete(FetchRequest),
}

impl DialogueState {
    /// Feeds one free-text message. Blank input leaves the state unchanged.
    pub fn advance(self, text: &str) -> DialogueState {
        let text = text.trim();
        if text.is_empty() {
            return self;
        }
        match self {
            DialogueState::AwaitingRegNo | DialogueState::Complete(_) => {
                DialogueState::AwaitingFirstName {
                    registration_number: text.to_string(),
                }
            }
            DialogueState::AwaitingFirstName {
                registration_number,
            } => match FetchRequest::new(&registration_number, text) {
                Ok(request) => DialogueState::Complete(request),
                Err(_) => DialogueState::AwaitingFirstName {
                    registration_number,
                },
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DialogueState::Complete(_))
    }
}
