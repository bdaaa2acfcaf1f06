use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::{
    handle::HandleSource,
    navigation::{Navigator, Route},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPageState {
    pub identity: String,
}

/// Resolves the caller's principal. Handle acquisition happens strictly before the call.
pub async fn initialize_page(handles: &dyn HandleSource) -> Result<EntryPageState> {
    let service = handles.handle().await?;
    let identity = service.whoami().await?;
    debug!(%identity, "entry: identity resolved");
    Ok(EntryPageState { identity })
}

pub async fn navigate_to_main(navigator: &dyn Navigator) -> Result<()> {
    navigator.goto(Route::Main).await
}

#[cfg(test)]
#[path = "tests/entry_tests.rs"]
mod tests;
