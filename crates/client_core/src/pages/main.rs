use anyhow::Result;
use shared::{
    domain::{Item, ItemId},
    error::into_raised,
    protocol::{CreateItemRequest, ItemOutcome, UpdateItemRequest},
};
use tracing::{debug, info};

use crate::handle::HandleSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePhase {
    Idle,
    Loading,
    Creating,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainPageState {
    pub items: Vec<Item>,
    pub phase: PagePhase,
}

impl MainPageState {
    pub fn loading(&self) -> bool {
        self.phase == PagePhase::Loading
    }

    pub fn creating(&self) -> bool {
        self.phase == PagePhase::Creating
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            PagePhase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn items_loaded(&mut self, items: Vec<Item>) {
        self.items = items;
        self.phase = PagePhase::Idle;
    }

    /// Enters `Creating`; refused while loading, creating or showing an error.
    pub fn begin_create(&mut self) -> bool {
        if self.phase != PagePhase::Idle {
            return false;
        }
        self.phase = PagePhase::Creating;
        true
    }

    /// Appends a saved item, or replaces the entry with the same id.
    pub fn item_saved(&mut self, item: Item) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.phase = PagePhase::Idle;
    }

    pub fn apply_outcome(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Saved(item) => self.item_saved(item),
            ItemOutcome::Rejected(message) => self.failed(message),
        }
    }

    pub fn item_deleted(&mut self, id: ItemId) {
        self.items.retain(|item| item.id != id);
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.phase = PagePhase::Error(message.into());
    }

    pub fn acknowledge_error(&mut self) {
        if matches!(self.phase, PagePhase::Error(_)) {
            self.phase = PagePhase::Idle;
        }
    }
}

pub fn initialize_state() -> MainPageState {
    MainPageState {
        items: Vec::new(),
        phase: PagePhase::Loading,
    }
}

pub async fn load_all_items(handles: &dyn HandleSource) -> Result<Vec<Item>> {
    let service = handles.handle().await?;
    let items = service.get_all_items().await?;
    debug!(count = items.len(), "main: loaded all items");
    Ok(items)
}

pub async fn load_my_items(handles: &dyn HandleSource) -> Result<Vec<Item>> {
    let service = handles.handle().await?;
    let items = service.get_my_items().await?;
    debug!(count = items.len(), "main: loaded caller's items");
    Ok(items)
}

/// Looks up one item; a backend miss is raised as [`shared::error::ItemRejected`].
pub async fn load_item(handles: &dyn HandleSource, id: ItemId) -> Result<Item> {
    let service = handles.handle().await?;
    Ok(into_raised(service.get_item(id).await?)?)
}

/// Backend rejections come back as [`ItemOutcome::Rejected`], not as errors.
pub async fn create_new_item(
    handles: &dyn HandleSource,
    name: &str,
    description: &str,
) -> Result<ItemOutcome> {
    let service = handles.handle().await?;
    let outcome = ItemOutcome::from(
        service
            .create_item(CreateItemRequest {
                name: name.to_string(),
                description: description.to_string(),
            })
            .await?,
    );
    log_outcome("create", &outcome);
    Ok(outcome)
}

pub async fn update_existing_item(
    handles: &dyn HandleSource,
    id: ItemId,
    name: &str,
    description: &str,
) -> Result<ItemOutcome> {
    let service = handles.handle().await?;
    let outcome = ItemOutcome::from(
        service
            .update_item(UpdateItemRequest {
                id,
                name: name.to_string(),
                description: description.to_string(),
            })
            .await?,
    );
    log_outcome("update", &outcome);
    Ok(outcome)
}

/// Unlike create, a backend rejection here is raised as
/// [`shared::error::ItemRejected`] carrying the backend message.
pub async fn delete_existing_item(handles: &dyn HandleSource, id: ItemId) -> Result<String> {
    let service = handles.handle().await?;
    let confirmation = into_raised(service.delete_item(id).await?)?;
    info!(item_id = id, "main: item deleted");
    Ok(confirmation)
}

fn log_outcome(action: &str, outcome: &ItemOutcome) {
    match outcome {
        ItemOutcome::Saved(item) => info!(item_id = item.id, "main: {action} accepted"),
        ItemOutcome::Rejected(reason) => info!(%reason, "main: {action} rejected by backend"),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
