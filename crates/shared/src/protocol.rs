use candid::CandidType;
use serde::{Deserialize, Serialize};

use crate::domain::{Item, ItemId};

/// Tagged reply of the mutating canister methods: `variant { Ok: T; Err: text }`.
pub type BackendResult<T> = Result<T, String>;

pub const WHOAMI: &str = "whoami";
pub const GET_ALL_ITEMS: &str = "get_all_items";
pub const GET_MY_ITEMS: &str = "get_my_items";
pub const GET_ITEM: &str = "get_item";
pub const CREATE_ITEM: &str = "create_item";
pub const UPDATE_ITEM: &str = "update_item";
pub const DELETE_ITEM: &str = "delete_item";

#[derive(Debug, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

/// Outcome of a create or update call as handed to a page.
///
/// Backend rejections are values here, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ItemOutcome {
    Saved(Item),
    Rejected(String),
}

impl ItemOutcome {
    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::Saved(item) => Some(item),
            Self::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl From<BackendResult<Item>> for ItemOutcome {
    fn from(value: BackendResult<Item>) -> Self {
        match value {
            Ok(item) => Self::Saved(item),
            Err(message) => Self::Rejected(message),
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
