//! HTTP API for the chat page

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::routing::MessageRouter;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<MessageRouter>,
}

impl AppState {
    pub fn new(router: Arc<MessageRouter>) -> Self {
        Self { router }
    }
}
