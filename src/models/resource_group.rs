//! Azure resource group data model.

use serde::{Deserialize, Serialize};

/// A resource group inside one subscription.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceGroup {
    /// Name, unique within its subscription.
    pub name: String,
    /// Canonical decimal LS, or empty when the tag is missing or not numeric.
    pub ls: String,
}

impl ResourceGroup {
    pub fn new(name: &str, ls: &str) -> ResourceGroup {
        ResourceGroup {
            name: name.to_string(),
            ls: ls.to_string(),
        }
    }
}
