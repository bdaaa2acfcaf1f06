//! Page controllers: each operation fetches the shared handle, issues one
//! backend call and shapes the reply for rendering.

pub mod entry;
pub mod main;
