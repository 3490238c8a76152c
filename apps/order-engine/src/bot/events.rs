//! Transport-agnostic bot events and replies.
//!
//! The bot core never touches a messenger API. A thin transport adapter
//! turns incoming messages into `BotEvent`s and renders `BotReply`s as
//! messages with buttons.

/// An incoming event from the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    /// Free-form text typed by the user.
    Text(String),
    /// A choice the user tapped, carrying its action string.
    Action(String),
}

/// One tappable choice offered with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotChoice {
    /// Label shown to the user.
    pub label: String,
    /// Action string delivered back as `BotEvent::Action` when tapped.
    pub action: String,
}

impl BotChoice {
    /// Create a choice.
    #[must_use]
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// The bot's reply to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    /// Message text.
    pub text: String,
    /// Choices to offer, possibly empty.
    pub choices: Vec<BotChoice>,
}

impl BotReply {
    /// A plain text reply with no choices.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// A reply with choices.
    #[must_use]
    pub fn with_choices(text: impl Into<String>, choices: Vec<BotChoice>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }
}
