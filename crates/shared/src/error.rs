use thiserror::Error;

use crate::protocol::BackendResult;

/// Business failure reported by the backend through the `Err` tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ItemRejected {
    pub message: String,
}

impl ItemRejected {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unwraps a tagged backend reply, raising the `Err` tag as [`ItemRejected`].
pub fn into_raised<T>(result: BackendResult<T>) -> Result<T, ItemRejected> {
    result.map_err(ItemRejected::new)
}
