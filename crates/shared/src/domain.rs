use candid::{CandidType, Principal};
use serde::{Deserialize, Serialize};

/// Backend-assigned item identifier (`nat64`).
pub type ItemId = u64;

/// Item record as stored by the backend canister.
///
/// Timestamps are nanoseconds since the Unix epoch, set by the canister.
#[derive(Debug, Clone, PartialEq, Eq, CandidType, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub owner: Principal,
    pub name: String,
    pub description: String,
    pub created_at: u64,
    pub updated_at: u64,
}

