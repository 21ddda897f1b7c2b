//! Makes the collapse state available to the views of a transcript

use floem::reactive::{Scope, provide_context, use_context};
use transcript_core::CollapseError;

use super::config::CollapseConfig;
use super::state::CollapseState;

/// Create the collapse state in `cx` and register it for
/// [`use_collapse_state`] in `cx` and its child scopes. The returned handle
/// can also be passed down explicitly.
pub fn provide_collapse_state(cx: Scope, config: CollapseConfig) -> CollapseState {
    let state = CollapseState::new(cx, config);
    cx.enter(|| provide_context(state));
    state
}

/// Fetch the collapse state registered by [`provide_collapse_state`] for the
/// current scope or one of its ancestors.
///
/// Fails with [`CollapseError::MissingProvider`] when no provider is set
/// up above the calling view, which is an integration bug in that view.
pub fn use_collapse_state() -> Result<CollapseState, CollapseError> {
    use_context::<CollapseState>().ok_or(CollapseError::MissingProvider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript_core::{ChatMessage, SayKind};

    #[test]
    fn test_missing_provider() {
        let err = use_collapse_state().err();
        assert_eq!(err, Some(CollapseError::MissingProvider));
        assert_eq!(
            CollapseError::MissingProvider.to_string(),
            "use_collapse_state must be used within a collapse provider"
        );
    }

    #[test]
    fn test_provided_state_is_shared() {
        let cx = Scope::new();
        let provided = provide_collapse_state(cx, CollapseConfig::default());
        let consumer = cx.enter(use_collapse_state).unwrap();

        consumer.toggle_collapse(1);
        assert!(provided.is_collapsed(1));

        let messages = vec![
            ChatMessage::api_request(1),
            ChatMessage::say(2, SayKind::Text, "hidden"),
        ];
        assert!(!provided.should_show_message(&messages[1], &messages));
    }

    #[test]
    fn test_child_scope_sees_provider() {
        let cx = Scope::new();
        let provided = provide_collapse_state(cx, CollapseConfig::default());
        let child = cx.create_child();
        let grandchild = child.create_child();

        let consumer = grandchild.enter(use_collapse_state).unwrap();
        provided.toggle_collapse(3);
        assert!(consumer.is_collapsed(3));
    }

    #[test]
    fn test_sibling_scope_has_no_provider() {
        let root = Scope::new();
        let provider_scope = root.create_child();
        let sibling = root.create_child();
        provide_collapse_state(provider_scope, CollapseConfig::default());

        assert_eq!(
            sibling.enter(use_collapse_state).err(),
            Some(CollapseError::MissingProvider)
        );
        assert_eq!(
            root.enter(use_collapse_state).err(),
            Some(CollapseError::MissingProvider)
        );
    }

    #[test]
    fn test_disposed_provider() {
        let root = Scope::new();
        let provider_scope = root.create_child();
        provide_collapse_state(provider_scope, CollapseConfig::default());
        assert!(provider_scope.enter(use_collapse_state).is_ok());

        provider_scope.dispose();
        assert_eq!(
            root.enter(use_collapse_state).err(),
            Some(CollapseError::MissingProvider)
        );
        assert_eq!(use_collapse_state().err(), Some(CollapseError::MissingProvider));
    }
}
