//! In-process fakes shared by the unit tests.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use candid::Principal;
use shared::{
    domain::{Item, ItemId},
    protocol::{BackendResult, CreateItemRequest, UpdateItemRequest},
};
use tokio::sync::Mutex;

use crate::{handle::HandleSource, service::ItemService};

pub(crate) fn item(id: ItemId, name: &str, description: &str) -> Item {
    Item {
        id,
        owner: Principal::anonymous(),
        name: name.into(),
        description: description.into(),
        created_at: 1_700_000_000_000_000_000,
        updated_at: 1_700_000_000_000_000_000,
    }
}

#[derive(Default)]
pub(crate) struct FakeService {
    pub identity: String,
    pub items: Vec<Item>,
    pub my_items: Vec<Item>,
    pub get_reply: Option<BackendResult<Item>>,
    pub create_reply: Option<BackendResult<Item>>,
    pub update_reply: Option<BackendResult<Item>>,
    pub delete_reply: Option<BackendResult<String>>,
    pub fail_with: Option<String>,
    pub calls: Mutex<Vec<String>>,
    pub create_requests: Mutex<Vec<CreateItemRequest>>,
    pub update_requests: Mutex<Vec<UpdateItemRequest>>,
    pub deleted_ids: Mutex<Vec<ItemId>>,
}

impl FakeService {
    pub(crate) fn with_identity(identity: &str) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }

    pub(crate) fn failing(err: impl Into<String>) -> Self {
        Self {
            fail_with: Some(err.into()),
            ..Self::default()
        }
    }

    async fn record(&self, method: &str) -> Result<()> {
        self.calls.lock().await.push(method.to_string());
        match &self.fail_with {
            Some(err) => Err(anyhow!(err.clone())),
            None => Ok(()),
        }
    }
}

fn configured<T: Clone>(reply: &Option<T>, method: &str) -> Result<T> {
    reply
        .clone()
        .ok_or_else(|| anyhow!("no {method} reply configured"))
}

#[async_trait]
impl ItemService for FakeService {
    async fn whoami(&self) -> Result<String> {
        self.record("whoami").await?;
        Ok(self.identity.clone())
    }

    async fn get_all_items(&self) -> Result<Vec<Item>> {
        self.record("get_all_items").await?;
        Ok(self.items.clone())
    }

    async fn get_my_items(&self) -> Result<Vec<Item>> {
        self.record("get_my_items").await?;
        Ok(self.my_items.clone())
    }

    async fn get_item(&self, _id: ItemId) -> Result<BackendResult<Item>> {
        self.record("get_item").await?;
        configured(&self.get_reply, "get_item")
    }

    async fn create_item(&self, request: CreateItemRequest) -> Result<BackendResult<Item>> {
        self.record("create_item").await?;
        self.create_requests.lock().await.push(request);
        configured(&self.create_reply, "create_item")
    }

    async fn update_item(&self, request: UpdateItemRequest) -> Result<BackendResult<Item>> {
        self.record("update_item").await?;
        self.update_requests.lock().await.push(request);
        configured(&self.update_reply, "update_item")
    }

    async fn delete_item(&self, id: ItemId) -> Result<BackendResult<String>> {
        self.record("delete_item").await?;
        self.deleted_ids.lock().await.push(id);
        configured(&self.delete_reply, "delete_item")
    }
}

/// Hands out a pre-built service, or refuses like an unreachable replica.
pub(crate) struct StaticHandle {
    service: Arc<FakeService>,
    reachable: bool,
}

impl StaticHandle {
    pub(crate) fn of(service: FakeService) -> (Self, Arc<FakeService>) {
        let service = Arc::new(service);
        let handles = Self {
            service: Arc::clone(&service),
            reachable: true,
        };
        (handles, service)
    }

    pub(crate) fn unreachable() -> (Self, Arc<FakeService>) {
        let (mut handles, service) = Self::of(FakeService::default());
        handles.reachable = false;
        (handles, service)
    }
}

#[async_trait]
impl HandleSource for StaticHandle {
    async fn handle(&self) -> Result<Arc<dyn ItemService>> {
        if !self.reachable {
            return Err(anyhow!("connection refused"));
        }
        Ok(Arc::clone(&self.service) as Arc<dyn ItemService>)
    }
}
