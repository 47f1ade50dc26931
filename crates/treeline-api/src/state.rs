//! Shared state handed to every request handler.

use std::sync::Arc;

use treeline_store::{GraphStore, SeedSet};

/// Handler state: the store and the dataset `/populate` loads.
///
/// Cloning is cheap (two `Arc` clones). The store is the only thing
/// requests share; each handler call borrows it for its own operations.
#[derive(Clone)]
pub struct ApiState {
    /// Graph store all handlers talk to.
    pub store: Arc<dyn GraphStore>,
    /// Dataset loaded by `POST /populate`.
    pub seed: Arc<SeedSet>,
}

impl ApiState {
    /// Create state from a store and a seed dataset.
    pub fn new(store: Arc<dyn GraphStore>, seed: SeedSet) -> Self {
        Self {
            store,
            seed: Arc::new(seed),
        }
    }
}
