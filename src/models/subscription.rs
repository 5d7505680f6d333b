//! Azure subscription data model.

use super::ResourceGroup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An Azure subscription as seen by the LS report.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Subscription {
    /// Display name, unique per extraction pass.
    pub name: String,
    /// Subscription GUID without the `/subscriptions/` prefix.
    pub id: String,
    /// Leistungsschein tag, empty if untagged. Not validated.
    pub ls: String,
    /// Resource groups keyed by name, filled by a later per-subscription query.
    #[serde(default)]
    pub resource_groups: HashMap<String, ResourceGroup>,
}

impl Subscription {
    pub fn new(name: &str, id: &str, ls: &str) -> Subscription {
        Subscription {
            name: name.to_string(),
            id: id.to_string(),
            ls: ls.to_string(),
            resource_groups: HashMap::new(),
        }
    }

    /// LS as printed in the report, `?` when untagged.
    pub fn ls_display(&self) -> &str {
        if self.ls.is_empty() {
            "?"
        } else {
            &self.ls
        }
    }
}
