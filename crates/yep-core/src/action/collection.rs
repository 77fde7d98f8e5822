use crate::{
    ThisError,
    action::{ActionRef, BaseAction},
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

///
/// ActionError
///

#[derive(Debug, ThisError)]
pub enum ActionError {
    #[error("unable to decode action: {source}")]
    Decode {
        raw: String,
        source: serde_json::Error,
    },

    #[error("action reference is not valid UTF-8: {0}")]
    InvalidRef(#[from] std::str::Utf8Error),
}

///
/// ActionCollection
/// actions by id; registration happens at start-up, lookups afterwards
///

#[derive(Debug, Default)]
pub struct ActionCollection {
    actions: RwLock<HashMap<String, Arc<BaseAction>>>,
}

impl ActionCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action, replacing any action with the same id.
    pub fn add(&self, action: BaseAction) -> Arc<BaseAction> {
        let action = Arc::new(action);
        self.actions
            .write()
            .expect("action registry RwLock poisoned")
            .insert(action.id.clone(), Arc::clone(&action));

        action
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Arc<BaseAction>> {
        self.actions
            .read()
            .expect("action registry RwLock poisoned")
            .get(id)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions
            .read()
            .expect("action registry RwLock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reference to a registered action; empty when the id is unknown.
    #[must_use]
    pub fn make_ref(&self, id: &str) -> ActionRef {
        self.get_by_id(id)
            .map(|action| ActionRef::new(id, &action.name))
            .unwrap_or_default()
    }

    /// Rebuild a reference from the id stored in the database.
    pub fn scan_ref(&self, src: impl AsRef<[u8]>) -> Result<ActionRef, ActionError> {
        let id = std::str::from_utf8(src.as_ref())?;

        Ok(self.make_ref(id))
    }

    /// Decode an action from JSON and register it.
    pub fn load_json(&self, raw: &str) -> Result<Arc<BaseAction>, ActionError> {
        let action = serde_json::from_str::<BaseAction>(raw).map_err(|source| {
            tracing::error!(error = %source, raw, "unable to decode action");

            ActionError::Decode {
                raw: raw.to_string(),
                source,
            }
        })?;

        Ok(self.add(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ActionCollection {
        let actions = ActionCollection::new();
        actions
            .load_json(r#"{"id": "base_action_users", "name": "Users", "res_model": "User"}"#)
            .unwrap();

        actions
    }

    #[test]
    fn refs_carry_the_action_name() {
        let actions = registry();

        assert_eq!(
            actions.make_ref("base_action_users"),
            ActionRef::new("base_action_users", "Users")
        );
        assert!(actions.make_ref("missing").is_empty());
    }

    #[test]
    fn refs_scan_from_text_or_bytes() {
        let actions = registry();

        assert_eq!(actions.scan_ref("base_action_users").unwrap().name, "Users");
        assert_eq!(actions.scan_ref(b"base_action_users".to_vec()).unwrap().name, "Users");
        assert!(matches!(
            actions.scan_ref([0xff, 0xfe]),
            Err(ActionError::InvalidRef(_))
        ));
    }

    #[test]
    fn adding_replaces_by_id() {
        let actions = registry();
        actions.add(BaseAction {
            id: "base_action_users".into(),
            name: "People".into(),
            ..BaseAction::default()
        });

        assert_eq!(actions.len(), 1);
        assert_eq!(actions.get_by_id("base_action_users").unwrap().name, "People");
    }

    #[test]
    fn bad_json_is_returned_with_its_content() {
        let err = registry().load_json("{not json").unwrap_err();

        assert!(matches!(err, ActionError::Decode { ref raw, .. } if raw == "{not json"));
    }
}
