use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollapseError {
    /// The collapse state was requested from a part of the UI tree that has
    /// no collapse provider above it.
    #[error("use_collapse_state must be used within a collapse provider")]
    MissingProvider,
}
