//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! portal keeps no data of its own: it holds the backend client and the
//! parsed configuration, both behind `Arc` so cloning per request is cheap.

use std::sync::Arc;

use crate::api::Backend;
use crate::config::Config;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, config: Config) -> Self {
        Self { backend, config: Arc::new(config) }
    }

    /// The backend as a trait object for endpoint calls.
    #[must_use]
    pub fn api(&self) -> &dyn Backend {
        self.backend.as_ref()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
