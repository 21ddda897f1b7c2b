//! Reactive collapse state for API request groups

use std::collections::HashSet;

use floem::reactive::{RwSignal, Scope, SignalGet, SignalUpdate, SignalWith};
use transcript_core::{
    CollapsedSet, GroupIndex, GroupedMessage, should_show_indexed, should_show_message,
};

use super::config::CollapseConfig;

/// Which API request groups the user collapsed in the transcript.
///
/// Every change publishes a new set instead of mutating the current one, so
/// a snapshot from [`CollapseState::collapsed_messages`] never changes under
/// its holder while views depending on the signal re-run.
#[derive(Clone, Copy)]
pub struct CollapseState {
    pub scope: Scope,
    collapsed: RwSignal<CollapsedSet>,
    config: CollapseConfig,
}

impl CollapseState {
    pub fn new(cx: Scope, config: CollapseConfig) -> Self {
        Self {
            scope: cx,
            collapsed: cx.create_rw_signal(CollapsedSet::new()),
            config,
        }
    }

    pub fn config(&self) -> CollapseConfig {
        self.config
    }

    /// Snapshot of the collapsed marker timestamps
    pub fn collapsed_messages(&self) -> CollapsedSet {
        self.collapsed.get()
    }

    /// Check if the group started by the marker `ts` is collapsed
    pub fn is_collapsed(&self, ts: u64) -> bool {
        self.collapsed.with(|set| set.contains(&ts))
    }

    /// Toggle the collapsed state of the group started by the marker `ts`
    pub fn toggle_collapse(&self, ts: u64) {
        let next = self.collapsed.with_untracked(|prev| {
            let mut next = prev.clone();
            if next.remove(&ts).is_some() {
                tracing::debug!("expanding api request group {}", ts);
            } else {
                tracing::debug!("collapsing api request group {}", ts);
                next.insert(ts);
            }
            next
        });
        self.collapsed.set(next);
    }

    /// Collapse every group started in `messages`
    pub fn collapse_all<'a, M, I>(&self, messages: I)
    where
        M: GroupedMessage + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let next = self.collapsed.with_untracked(|prev| {
            let mut next = prev.clone();
            next.extend(
                messages
                    .into_iter()
                    .filter(|m| m.is_group_marker())
                    .map(|m| m.ts()),
            );
            next
        });
        tracing::debug!("collapsed all api request groups, {} in total", next.len());
        self.collapsed.set(next);
    }

    pub fn expand_all(&self) {
        tracing::debug!("expanding all api request groups");
        self.collapsed.set(CollapsedSet::new());
    }

    /// Forget collapsed groups whose marker is no longer in `messages`.
    /// Returns how many were dropped.
    pub fn prune<'a, M, I>(&self, messages: I) -> usize
    where
        M: GroupedMessage + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let markers: HashSet<u64> = messages
            .into_iter()
            .filter(|m| m.is_group_marker())
            .map(|m| m.ts())
            .collect();

        let (next, removed) = self.collapsed.with_untracked(|prev| {
            let next: CollapsedSet = prev
                .iter()
                .copied()
                .filter(|ts| markers.contains(ts))
                .collect();
            let removed = prev.len() - next.len();
            (next, removed)
        });

        if removed > 0 {
            tracing::info!("pruned {} stale collapsed groups", removed);
            self.collapsed.set(next);
        }
        removed
    }

    /// Called when the renderer replaces the transcript. Prunes stale groups
    /// if `prune-stale` is enabled, otherwise leaves the set alone.
    pub fn sync_messages<'a, M, I>(&self, messages: I) -> usize
    where
        M: GroupedMessage + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        if self.config.prune_stale {
            self.prune(messages)
        } else {
            0
        }
    }

    /// Whether `message` should be rendered. `messages` is the ordered
    /// transcript it belongs to.
    pub fn should_show_message<'a, M, I>(&self, message: &M, messages: I) -> bool
    where
        M: GroupedMessage + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        self.collapsed.with(|set| should_show_message(set, message, messages))
    }

    /// Like [`Self::should_show_message`], without rescanning the transcript
    pub fn should_show_indexed<M: GroupedMessage>(
        &self,
        message: &M,
        index: &GroupIndex,
    ) -> bool {
        self.collapsed.with(|set| should_show_indexed(set, message, index))
    }

    /// The messages of `messages` that should be rendered, in order
    pub fn visible_messages<'a, M, I>(&self, messages: I) -> Vec<M>
    where
        M: GroupedMessage + Clone + 'a,
        I: IntoIterator<Item = &'a M> + Clone,
    {
        let index = GroupIndex::from_messages(messages.clone());
        self.collapsed.with(|set| {
            messages
                .into_iter()
                .filter(|m| should_show_indexed(set, *m, &index))
                .cloned()
                .collect()
        })
    }
}
