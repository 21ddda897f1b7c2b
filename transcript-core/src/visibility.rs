//! Which messages are rendered while API request groups are collapsed

use crate::group_index::GroupIndex;
use crate::message::GroupedMessage;

/// Timestamps of the API request markers the user collapsed
pub type CollapsedSet = im::HashSet<u64>;

/// Find the marker governing `message`: the message itself if it is a
/// marker, otherwise the nearest marker before the first entry in
/// `messages` sharing its timestamp.
///
/// Returns `None` when no marker precedes the message, or when the message
/// is not part of `messages` at all.
pub fn governing_marker<'a, M, I>(message: &M, messages: I) -> Option<u64>
where
    M: GroupedMessage + 'a,
    I: IntoIterator<Item = &'a M>,
{
    let ts = message.ts();
    if message.is_group_marker() {
        return Some(ts);
    }

    let mut previous_marker = None;
    for entry in messages {
        if entry.ts() == ts {
            return previous_marker;
        }
        if entry.is_group_marker() {
            previous_marker = Some(entry.ts());
        }
    }

    tracing::trace!("message {} not found in transcript", ts);
    None
}

/// Whether `message` should be rendered given the collapsed markers.
///
/// Markers are always shown. Any other message is hidden only when its
/// governing marker is collapsed.
pub fn should_show_message<'a, M, I>(
    collapsed: &CollapsedSet,
    message: &M,
    messages: I,
) -> bool
where
    M: GroupedMessage + 'a,
    I: IntoIterator<Item = &'a M>,
{
    if message.is_group_marker() {
        return true;
    }
    governing_marker(message, messages).is_none_or(|marker| !collapsed.contains(&marker))
}

/// Same rule as [`should_show_message`], answered from a prebuilt index
pub fn should_show_indexed<M: GroupedMessage>(
    collapsed: &CollapsedSet,
    message: &M,
    index: &GroupIndex,
) -> bool {
    if message.is_group_marker() {
        return true;
    }
    index
        .governing_marker(message.ts())
        .is_none_or(|marker| !collapsed.contains(&marker))
}
