use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use candid::{CandidType, Principal};
use ic_agent::Agent;
use serde::de::DeserializeOwned;
use shared::{
    domain::{Item, ItemId},
    protocol::{
        BackendResult, CreateItemRequest, UpdateItemRequest, CREATE_ITEM, DELETE_ITEM,
        GET_ALL_ITEMS, GET_ITEM, GET_MY_ITEMS, UPDATE_ITEM, WHOAMI,
    },
};
use tracing::debug;

use crate::{handle::Connector, service::ItemService};

/// [`ItemService`] backed by an `ic-agent` connection to one canister.
pub struct CanisterClient {
    agent: Agent,
    canister_id: Principal,
}

impl CanisterClient {
    pub fn new(agent: Agent, canister_id: Principal) -> Self {
        Self { agent, canister_id }
    }

    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }

    async fn query<R>(&self, method: &str, arg: Vec<u8>) -> Result<R>
    where
        R: CandidType + DeserializeOwned,
    {
        debug!(canister = %self.canister_id, method, "query call");
        let reply = self
            .agent
            .query(&self.canister_id, method)
            .with_arg(arg)
            .call()
            .await
            .with_context(|| format!("query {method} on canister {} failed", self.canister_id))?;
        decode_reply(method, &reply)
    }

    async fn update<R>(&self, method: &str, arg: Vec<u8>) -> Result<R>
    where
        R: CandidType + DeserializeOwned,
    {
        debug!(canister = %self.canister_id, method, "update call");
        let reply = self
            .agent
            .update(&self.canister_id, method)
            .with_arg(arg)
            .call_and_wait()
            .await
            .with_context(|| format!("update {method} on canister {} failed", self.canister_id))?;
        decode_reply(method, &reply)
    }
}

pub(crate) fn decode_reply<R>(method: &str, reply: &[u8]) -> Result<R>
where
    R: CandidType + DeserializeOwned,
{
    candid::decode_one(reply).with_context(|| format!("failed to decode {method} reply"))
}

fn no_args() -> Result<Vec<u8>> {
    candid::encode_args(()).context("failed to encode empty argument list")
}

fn one_arg<T: CandidType>(method: &str, arg: T) -> Result<Vec<u8>> {
    candid::encode_one(arg).with_context(|| format!("failed to encode {method} argument"))
}

#[async_trait]
impl ItemService for CanisterClient {
    async fn whoami(&self) -> Result<String> {
        self.query(WHOAMI, no_args()?).await
    }

    async fn get_all_items(&self) -> Result<Vec<Item>> {
        self.query(GET_ALL_ITEMS, no_args()?).await
    }

    async fn get_my_items(&self) -> Result<Vec<Item>> {
        self.query(GET_MY_ITEMS, no_args()?).await
    }

    async fn get_item(&self, id: ItemId) -> Result<BackendResult<Item>> {
        self.query(GET_ITEM, one_arg(GET_ITEM, id)?).await
    }

    async fn create_item(&self, request: CreateItemRequest) -> Result<BackendResult<Item>> {
        self.update(CREATE_ITEM, one_arg(CREATE_ITEM, &request)?).await
    }

    async fn update_item(&self, request: UpdateItemRequest) -> Result<BackendResult<Item>> {
        self.update(UPDATE_ITEM, one_arg(UPDATE_ITEM, &request)?).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<BackendResult<String>> {
        self.update(DELETE_ITEM, one_arg(DELETE_ITEM, id)?).await
    }
}

/// Production [`Connector`]: plain `ic-agent` over HTTP.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcConnector;

#[async_trait]
impl Connector for IcConnector {
    type Agent = Agent;

    fn build_agent(&self, host: &str) -> Result<Agent> {
        Agent::builder()
            .with_url(host)
            .build()
            .with_context(|| format!("failed to build agent for {host}"))
    }

    async fn fetch_root_key(&self, agent: &Agent) -> Result<()> {
        agent
            .fetch_root_key()
            .await
            .context("root key request failed")
    }

    fn create_service(&self, agent: Agent, canister_id: Principal) -> Arc<dyn ItemService> {
        let client = CanisterClient::new(agent, canister_id);
        debug!(canister = %client.canister_id(), "canister client ready");
        Arc::new(client)
    }
}

#[cfg(test)]
#[path = "tests/canister_tests.rs"]
mod tests;
