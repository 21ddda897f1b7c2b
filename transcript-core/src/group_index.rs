//! Incrementally maintained mapping from message to its API request marker

use im::{HashMap, HashSet, Vector};

use crate::message::GroupedMessage;

/// Maps every indexed timestamp to the marker in effect before its first
/// occurrence, which is the marker governing a non-marker message with that
/// timestamp.
///
/// Updated on append so visibility checks do not have to rescan the
/// transcript. Cloning is cheap, the maps are persistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    preceding: HashMap<u64, Option<u64>>,
    marker_ids: HashSet<u64>,
    markers: Vector<u64>,
    current: Option<u64>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages<'a, M, I>(messages: I) -> Self
    where
        M: GroupedMessage + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let mut index = Self::new();
        index.extend(messages);
        index
    }

    /// Index one more message appended to the end of the transcript
    pub fn push<M: GroupedMessage>(&mut self, message: &M) {
        let ts = message.ts();
        if !self.preceding.contains_key(&ts) {
            self.preceding.insert(ts, self.current);
        }

        if message.is_group_marker() {
            // a repeated marker still opens a new group for what follows
            self.current = Some(ts);
            if self.marker_ids.insert(ts).is_none() {
                self.markers.push_back(ts);
            }
        }
    }

    pub fn extend<'a, M, I>(&mut self, messages: I)
    where
        M: GroupedMessage + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        for message in messages {
            self.push(message);
        }
    }

    /// Drop everything and index `messages` from scratch, for when the
    /// transcript is replaced rather than appended to
    pub fn rebuild<'a, M, I>(&mut self, messages: I)
    where
        M: GroupedMessage + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        *self = Self::from_messages(messages);
    }

    /// Marker governing a non-marker message with timestamp `ts`: the
    /// nearest marker before the first entry carrying that timestamp.
    /// Markers themselves are always shown and are not looked up here.
    pub fn governing_marker(&self, ts: u64) -> Option<u64> {
        self.preceding.get(&ts).copied().flatten()
    }

    /// Marker timestamps in transcript order
    pub fn markers(&self) -> impl Iterator<Item = u64> + '_ {
        self.markers.iter().copied()
    }

    pub fn is_marker(&self, ts: u64) -> bool {
        self.marker_ids.contains(&ts)
    }

    pub fn contains(&self, ts: u64) -> bool {
        self.preceding.contains_key(&ts)
    }

    pub fn len(&self) -> usize {
        self.preceding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preceding.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ChatMessage, SayKind};

    #[test]
    fn test_push_tracks_current_marker() {
        let mut index = GroupIndex::new();
        assert!(index.is_empty());

        index.push(&ChatMessage::say(1, SayKind::Text, "task"));
        index.push(&ChatMessage::api_request(2));
        index.push(&ChatMessage::say(3, SayKind::Text, "a"));
        index.push(&ChatMessage::api_request(4));
        index.push(&ChatMessage::say(5, SayKind::Text, "b"));

        assert_eq!(index.len(), 5);
        assert_eq!(index.governing_marker(1), None);
        assert_eq!(index.governing_marker(3), Some(2));
        assert_eq!(index.governing_marker(5), Some(4));
        assert_eq!(index.governing_marker(42), None);
        assert!(!index.contains(42));
        assert_eq!(index.markers().collect::<Vec<_>>(), vec![2, 4]);
        assert!(index.is_marker(4));
        assert!(!index.is_marker(5));
    }

    #[test]
    fn test_duplicate_keeps_first_mapping() {
        let messages = vec![
            ChatMessage::api_request(1),
            ChatMessage::say(2, SayKind::Text, "first"),
            ChatMessage::api_request(3),
            ChatMessage::say(2, SayKind::Text, "again"),
            ChatMessage::api_request(1),
            ChatMessage::say(6, SayKind::Text, "after repeated marker"),
        ];
        let index = GroupIndex::from_messages(&messages);
        assert_eq!(index.governing_marker(2), Some(1));
        assert_eq!(index.governing_marker(6), Some(1));
        assert_eq!(index.markers().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_marker_and_message_sharing_ts() {
        let messages = vec![
            ChatMessage::api_request(1),
            ChatMessage::api_request(5),
            ChatMessage::say(5, SayKind::Text, "same ts as the marker"),
        ];
        let index = GroupIndex::from_messages(&messages);
        assert!(index.is_marker(5));
        // the first entry with ts 5 is the marker, preceded by marker 1
        assert_eq!(index.governing_marker(5), Some(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut index = GroupIndex::from_messages(&[
            ChatMessage::api_request(1),
            ChatMessage::say(2, SayKind::Text, "old"),
        ]);
        index.rebuild(&[ChatMessage::say(7, SayKind::Text, "new")]);
        assert_eq!(index.len(), 1);
        assert!(!index.contains(2));
        assert_eq!(index.governing_marker(7), None);
        assert_eq!(index.markers().count(), 0);
    }
}
