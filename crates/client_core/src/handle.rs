//! Lazily-built, shared handle to the backend canister.
//!
//! One [`HandleProvider`] is created at startup and passed to the page
//! controllers. The first [`HandleProvider::get_handle`] call builds the agent
//! and service client; every later call returns the same instance.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use candid::Principal;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::{
    config::{ExecutionContext, NetworkMode, Settings},
    service::ItemService,
};

/// Builds the pieces of a handle. Split into steps so the provider owns the
/// ordering and the root-key recovery policy.
#[async_trait]
pub trait Connector: Send + Sync {
    type Agent: Send + Sync;

    fn build_agent(&self, host: &str) -> Result<Self::Agent>;
    async fn fetch_root_key(&self, agent: &Self::Agent) -> Result<()>;
    fn create_service(&self, agent: Self::Agent, canister_id: Principal) -> Arc<dyn ItemService>;
}

/// Anything a page controller can ask for the backend handle.
#[async_trait]
pub trait HandleSource: Send + Sync {
    async fn handle(&self) -> Result<Arc<dyn ItemService>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionPlan {
    pub network: NetworkMode,
    pub host: &'static str,
    pub fetch_root_key: bool,
}

impl ConnectionPlan {
    pub fn for_settings(settings: &Settings) -> Self {
        let network = settings.network_mode();
        Self {
            network,
            host: network.host(),
            fetch_root_key: network == NetworkMode::Local
                && settings.execution_context == ExecutionContext::Client,
        }
    }
}

pub struct HandleProvider<C: Connector> {
    settings: Settings,
    connector: C,
    handle: OnceCell<Arc<dyn ItemService>>,
}

impl<C: Connector> HandleProvider<C> {
    pub fn new(settings: Settings, connector: C) -> Self {
        Self {
            settings,
            connector,
            handle: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.initialized()
    }

    /// Returns the shared handle, building it on first use.
    ///
    /// A failed build is not cached; the next call tries again.
    pub async fn get_handle(&self) -> Result<Arc<dyn ItemService>> {
        self.handle
            .get_or_try_init(|| self.connect())
            .await
            .cloned()
    }

    async fn connect(&self) -> Result<Arc<dyn ItemService>> {
        let plan = ConnectionPlan::for_settings(&self.settings);
        info!(
            network = %plan.network,
            host = plan.host,
            canister_id = %self.settings.canister_id,
            "handle: building backend agent"
        );

        let agent = self.connector.build_agent(plan.host)?;

        if plan.fetch_root_key {
            if let Err(err) = self.connector.fetch_root_key(&agent).await {
                warn!("handle: unable to fetch root key: {err:#}");
            }
        }

        let canister_id = Principal::from_text(&self.settings.canister_id).with_context(|| {
            format!(
                "invalid backend canister id '{}'",
                self.settings.canister_id
            )
        })?;

        Ok(self.connector.create_service(agent, canister_id))
    }
}

#[async_trait]
impl<C: Connector> HandleSource for HandleProvider<C> {
    async fn handle(&self) -> Result<Arc<dyn ItemService>> {
        self.get_handle().await
    }
}

#[cfg(test)]
#[path = "tests/handle_tests.rs"]
mod tests;
