//! HTTP API for Embellisher
//!
//! Receives modal submissions and flow starts from the chat platform.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::interaction::InteractionDispatcher;
use crate::platform::{Platform, StateStore};
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState<S: StateStore, P: Platform> {
    pub dispatcher: Arc<InteractionDispatcher<S, P>>,
}

impl<S: StateStore, P: Platform> AppState<S, P> {
    pub fn new(dispatcher: InteractionDispatcher<S, P>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl<S: StateStore, P: Platform> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}
