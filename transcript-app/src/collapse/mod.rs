//! Collapse state for API request groups in the chat transcript
//!
//! The state lives in a reactive signal owned by the provider's scope.
//! Views either receive the [`CollapseState`] handle directly or look it up
//! with [`use_collapse_state`] anywhere below [`provide_collapse_state`].

pub mod config;
pub mod provider;
pub mod state;

pub use config::CollapseConfig;
pub use provider::{provide_collapse_state, use_collapse_state};
pub use state::CollapseState;
pub use transcript_core::{CollapseError, CollapsedSet, GroupIndex, GroupedMessage};
