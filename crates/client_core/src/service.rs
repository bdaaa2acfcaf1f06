use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{Item, ItemId},
    protocol::{BackendResult, CreateItemRequest, UpdateItemRequest},
};

/// Typed view of the backend canister.
///
/// The outer `Result` carries transport and decoding failures; the inner
/// [`BackendResult`] is the canister's own `Ok`/`Err` tag, left untouched for
/// the page controllers to shape.
#[async_trait]
pub trait ItemService: Send + Sync {
    async fn whoami(&self) -> Result<String>;
    async fn get_all_items(&self) -> Result<Vec<Item>>;
    async fn get_my_items(&self) -> Result<Vec<Item>>;
    async fn get_item(&self, id: ItemId) -> Result<BackendResult<Item>>;
    async fn create_item(&self, request: CreateItemRequest) -> Result<BackendResult<Item>>;
    async fn update_item(&self, request: UpdateItemRequest) -> Result<BackendResult<Item>>;
    async fn delete_item(&self, id: ItemId) -> Result<BackendResult<String>>;
}
