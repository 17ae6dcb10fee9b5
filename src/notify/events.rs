//! Change Events
//!
//! The message pushed to real-time subscribers after a catalog mutation.

use serde::Serialize;

use crate::catalog::ProductId;

/// What happened to the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Added,
    Updated,
    Deleted,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Added => "added",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
        }
    }
}

/// `ProductChanged(action, id)`.
///
/// Serialized as `{"event":"ProductChanged","action":"added","id":4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename = "ProductChanged")]
pub struct ProductChanged {
    pub action: ChangeAction,
    pub id: ProductId,
}

impl ProductChanged {
    pub fn added(id: ProductId) -> Self {
        Self {
            action: ChangeAction::Added,
            id,
        }
    }

    pub fn updated(id: ProductId) -> Self {
        Self {
            action: ChangeAction::Updated,
            id,
        }
    }

    pub fn deleted(id: ProductId) -> Self {
        Self {
            action: ChangeAction::Deleted,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(ProductChanged::deleted(7)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event": "ProductChanged", "action": "deleted", "id": 7 })
        );
    }
}
