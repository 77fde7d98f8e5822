mod collection;

pub use collection::*;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, sync::Arc};

///
/// ActionType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ActionType {
    #[default]
    #[serde(rename = "ir.actions.act_window")]
    ActWindow,

    #[serde(rename = "ir.actions.server")]
    Server,
}

///
/// ActionViewType
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionViewType {
    #[default]
    Form,
    Tree,
}

// a reference is an (id, name) pair written as `[id, name]`, or `null` when unset
macro_rules! reference {
    ($name:ident) => {
        #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
        pub struct $name {
            pub id: String,
            pub name: String,
        }

        impl $name {
            #[must_use]
            pub fn new(id: &str, name: &str) -> Self {
                Self {
                    id: id.to_string(),
                    name: name.to_string(),
                }
            }

            #[must_use]
            pub const fn is_empty(&self) -> bool {
                self.id.is_empty()
            }

            /// The id, as stored in the database.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.id
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if self.is_empty() {
                    serializer.serialize_none()
                } else {
                    (&self.id, &self.name).serialize(serializer)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let pair = Option::<(String, String)>::deserialize(deserializer)?;

                Ok(pair.map(|(id, name)| Self { id, name }).unwrap_or_default())
            }
        }
    };
}

reference!(ActionRef);
reference!(ViewRef);

///
/// ViewTuple
/// a view id and the kind of view it renders
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ViewTuple(pub String, pub ActionViewType);

///
/// BaseAction
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct BaseAction {
    pub id: String,

    #[serde(rename = "type")]
    pub action_type: ActionType,

    pub name: String,

    #[serde(rename = "res_model")]
    pub model: String,

    pub res_id: i64,

    #[serde(rename = "groups_id")]
    pub groups: Vec<String>,

    pub domain: String,
    pub help: String,

    #[serde(rename = "search_view_id")]
    pub search_view: ViewRef,

    pub src_model: String,
    pub usage: String,
    pub views: Vec<ViewTuple>,

    #[serde(rename = "view_id")]
    pub view: ViewRef,

    pub auto_refresh: bool,

    #[serde(skip)]
    pub manual_search: bool,

    #[serde(skip)]
    pub act_view_type: ActionViewType,

    pub view_mode: String,
    pub view_ids: Vec<String>,
    pub multi: bool,
    pub target: String,
    pub auto_search: bool,
    pub filter: bool,
    pub limit: i64,
    pub context: Option<BTreeMap<String, serde_json::Value>>,
}

///
/// Toolbar
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Toolbar {
    pub print: Vec<Arc<BaseAction>>,
    pub action: Vec<Arc<BaseAction>>,
    pub relate: Vec<Arc<BaseAction>>,
}
