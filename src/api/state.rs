use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};

use crate::core::AppConfig;

pub type SharedState = Arc<RwLock<AppState>>;

pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Snapshot of the configuration so no lock is held across awaits.
    pub fn config(state: &SharedState) -> Result<AppConfig> {
        let state = state
            .read()
            .map_err(|_| anyhow!("Unable to read shared state"))?;
        Ok(state.config.clone())
    }
}
