use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Entry,
    Main,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Entry => "/",
            Self::Main => "/main",
        }
    }
}

/// Client-side route changes.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn goto(&self, route: Route) -> Result<()>;
}

/// In-memory navigator that records every route change. Starts on the entry page.
pub struct History {
    visited: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self {
            visited: Mutex::new(vec![Route::Entry]),
        }
    }

    pub async fn current(&self) -> Route {
        self.visited
            .lock()
            .await
            .last()
            .copied()
            .unwrap_or(Route::Entry)
    }

    pub async fn visited(&self) -> Vec<Route> {
        self.visited.lock().await.clone()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Navigator for History {
    async fn goto(&self, route: Route) -> Result<()> {
        debug!(path = route.path(), "navigate");
        self.visited.lock().await.push(route);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
