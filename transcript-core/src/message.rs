//! Message records produced by the extension host

use serde::{Deserialize, Serialize};

/// A transcript entry that can take part in API request grouping.
///
/// The renderer owns the records; grouping only ever reads the timestamp
/// and the marker tag.
pub trait GroupedMessage {
    /// Timestamp of the message, unique within a transcript
    fn ts(&self) -> u64;

    /// Whether this message starts a new API request group
    fn is_group_marker(&self) -> bool;
}

impl<T: GroupedMessage + ?Sized> GroupedMessage for &T {
    fn ts(&self) -> u64 {
        (**self).ts()
    }

    fn is_group_marker(&self) -> bool {
        (**self).is_group_marker()
    }
}

/// Whether the message asks the user something or just reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Ask,
    Say,
}

/// What a `say` message reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SayKind {
    Text,
    Error,
    /// Start of an API request; every message up to the next one belongs to it
    ApiReqStarted,
    ApiReqFinished,
    ApiReqRetried,
    CompletionResult,
    UserFeedback,
    UserFeedbackDiff,
    CommandOutput,
    Tool,
    Info,
    /// Anything this build does not know about yet
    #[serde(other)]
    Unknown,
}

/// A single message as sent by the extension host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Creation time in milliseconds, doubles as the message ID
    pub ts: u64,
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub say: Option<SayKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Still being streamed
    #[serde(default)]
    pub partial: bool,
}

impl ChatMessage {
    pub fn say(ts: u64, say: SayKind, text: impl Into<String>) -> Self {
        Self {
            ts,
            kind: MessageType::Say,
            ask: None,
            say: Some(say),
            text: Some(text.into()),
            images: Vec::new(),
            partial: false,
        }
    }

    pub fn ask(ts: u64, ask: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            ts,
            kind: MessageType::Ask,
            ask: Some(ask.into()),
            say: None,
            text: Some(text.into()),
            images: Vec::new(),
            partial: false,
        }
    }

    /// Marker for the start of an API request group
    pub fn api_request(ts: u64) -> Self {
        Self {
            text: None,
            ..Self::say(ts, SayKind::ApiReqStarted, "")
        }
    }
}

impl GroupedMessage for ChatMessage {
    fn ts(&self) -> u64 {
        self.ts
    }

    fn is_group_marker(&self) -> bool {
        self.say == Some(SayKind::ApiReqStarted)
    }
}
