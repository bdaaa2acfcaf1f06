//! Client for the items canister: handle lifecycle, typed service calls and
//! page controllers.

pub mod canister;
pub mod config;
pub mod handle;
pub mod navigation;
pub mod pages;
pub mod service;

pub use canister::{CanisterClient, IcConnector};
pub use config::{load_settings, ExecutionContext, NetworkMode, Settings};
pub use handle::{ConnectionPlan, Connector, HandleProvider, HandleSource};
pub use navigation::{History, Navigator, Route};
pub use service::ItemService;

/// Handle provider wired to the real `ic-agent` transport.
pub type IcHandleProvider = HandleProvider<IcConnector>;

impl IcHandleProvider {
    pub fn from_settings(settings: Settings) -> Self {
        HandleProvider::new(settings, IcConnector)
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
