//! Toolkit-independent pieces of the chat transcript: message records,
//! API request grouping and the collapse visibility rule.

pub mod error;
pub mod group_index;
pub mod message;
pub mod visibility;

pub use error::CollapseError;
pub use group_index::GroupIndex;
pub use message::{ChatMessage, GroupedMessage, MessageType, SayKind};
pub use visibility::{
    CollapsedSet, governing_marker, should_show_indexed, should_show_message,
};
