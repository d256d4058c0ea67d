//! Roster settings kept outside the sheet: the list of known positions and the
//! employee id of the current user.

use std::{collections::HashMap, sync::Arc, sync::Mutex};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::instrument;

use crate::error::HrResult;

pub const POSITIONS_KEY: &str = "POSITIONS_LIST";
pub const ME_EMPLOYEE_KEY: &str = "ME_EMP_ID";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| anyhow!("settings lock poisoned"))
    }
}

#[async_trait]
impl KeyValueStore for MemorySettings {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.values()?.remove(key);
        Ok(())
    }
}

pub struct Settings {
    store: Arc<dyn KeyValueStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "hr.settings.positions", skip_all)]
    pub async fn positions_list(&self) -> HrResult<Vec<String>> {
        let Some(raw) = self.store.get(POSITIONS_KEY).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let positions = serde_json::from_str(&raw).context("stored positions list is malformed")?;
        Ok(positions)
    }

    /// Trim every entry and drop the empty ones; order and repeats are kept.
    /// Returns what was stored.
    #[instrument(name = "hr.settings.save_positions", skip_all, fields(count = positions.len()))]
    pub async fn save_positions_list(&self, positions: Vec<String>) -> HrResult<Vec<String>> {
        let normalized = positions
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        let raw = serde_json::to_string(&normalized).context("serialize positions list")?;
        self.store.set(POSITIONS_KEY, &raw).await?;
        Ok(normalized)
    }

    #[instrument(name = "hr.settings.me", skip_all)]
    pub async fn me_employee_id(&self) -> HrResult<Option<String>> {
        Ok(self
            .store
            .get(ME_EMPLOYEE_KEY)
            .await?
            .filter(|value| !value.is_empty()))
    }

    #[instrument(name = "hr.settings.set_me", skip(self))]
    pub async fn set_me_employee_id(&self, emp_id: &str) -> HrResult<()> {
        self.store.set(ME_EMPLOYEE_KEY, emp_id).await?;
        Ok(())
    }

    #[instrument(name = "hr.settings.clear_me", skip_all)]
    pub async fn clear_me_employee_id(&self) -> HrResult<()> {
        self.store.delete(ME_EMPLOYEE_KEY).await?;
        Ok(())
    }
}
